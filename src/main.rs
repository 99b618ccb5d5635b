//! Movie Explorer - Rust Edition
//! A desktop client for browsing, searching and saving movies from TMDB

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use chrono::Datelike;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod api;
mod browse;
mod config;
mod favorites;
mod models;
mod session;
mod store;

use api::{image_url, trailer_url, ImageSize, TmdbClient};
use browse::{BrowseConfig, BrowseController, FetchRequest, ScrollMetrics};
use config::AppConfig;
use favorites::FavoritesStore;
use models::*;
use session::{validate_login, SessionStore};
use store::FileStore;

const CARD_WIDTH: f32 = 160.0;
const POSTER_HEIGHT: f32 = 240.0;
const YEAR_OPTIONS: i32 = 50;
const HEADING_QUERY_CHARS: usize = 15;
const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Load application icon: film frame with a play button
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Film strip perforations along the left and right edge
            let in_strip = nx < 0.16 || nx > 0.84;
            let in_hole = in_strip && (ny * 8.0).fract() > 0.35 && (ny * 8.0).fract() < 0.75
                && ((nx > 0.04 && nx < 0.12) || (nx > 0.88 && nx < 0.96));

            // Play triangle in the middle of the frame
            let px = nx - 0.38;
            let py = ny - 0.5;
            let in_play = px >= 0.0 && px <= 0.28 && py.abs() <= (0.28 - px) * 0.6;

            let (r, g, b, a) = if in_hole {
                (0, 0, 0, 0)
            } else if in_strip {
                // #1a1a2e
                (26, 26, 46, 255)
            } else if in_play {
                (255, 255, 255, 255)
            } else {
                // Red to orange gradient (#e50914 to #f5a623)
                let t = ny;
                (
                    (229.0 + (245.0 - 229.0) * t) as u8,
                    (9.0 + (166.0 - 9.0) * t) as u8,
                    (20.0 + (35.0 - 20.0) * t) as u8,
                    255,
                )
            };
            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = a;
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Heading of the home view
fn results_heading(query: &str, compact: bool) -> String {
    let query = query.trim();
    if query.is_empty() {
        return "Trending Now".to_string();
    }
    if compact && query.chars().count() > HEADING_QUERY_CHARS {
        let short: String = query.chars().take(HEADING_QUERY_CHARS).collect();
        format!("Results for \"{}...\"", short)
    } else {
        format!("Results for \"{}\"", query)
    }
}

/// Years offered by the year filter, newest first
fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_OPTIONS).map(|offset| current_year - offset).collect()
}

// Background task results
enum TaskResult {
    TrendingLoaded {
        generation: u64,
        items: Vec<CatalogItem>,
    },
    SearchLoaded {
        generation: u64,
        page: SearchPage,
    },
    DetailsLoaded {
        id: i64,
        item: Option<CatalogItem>,
    },
    GenresLoaded(Vec<Genre>),
    Error(String),
}

/// Context for background fetch operations
struct FetchContext {
    client: Arc<TmdbClient>,
    sender: Sender<TaskResult>,
    egui_ctx: egui::Context,
}

impl FetchContext {
    fn send(&self, result: TaskResult) {
        let _ = self.sender.send(result);
        self.egui_ctx.request_repaint();
    }
}

/// Deferred card interaction, applied after the grid is drawn
enum CardAction {
    Open(i64),
    ToggleFavorite(CatalogItem),
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Force X11 backend on Linux before any windowing code runs
    #[cfg(target_os = "linux")]
    {
        std::env::set_var("WINIT_UNIX_BACKEND", "x11");
        std::env::remove_var("WAYLAND_DISPLAY");
    }

    let config = AppConfig::load();
    if config.effective_api_key().is_empty() {
        log::warn!("No TMDB API key configured, set {} or edit the config file", config::API_KEY_ENV);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([480.0, 480.0])
            .with_icon(load_icon()),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    eframe::run_native(
        "Movie Explorer",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(MovieExplorerApp::new(cc.egui_ctx.clone(), config)))
        }),
    )
}

struct MovieExplorerApp {
    config: AppConfig,
    client: Arc<TmdbClient>,
    favorites: FavoritesStore<FileStore>,
    sessions: SessionStore<FileStore>,

    // Navigation
    view: View,
    redirect_after_login: Option<View>,

    // Home
    browse: BrowseController,
    query_input: String,
    filter_draft: FilterCriteria,
    genres: Vec<Genre>,
    years: Vec<i32>,
    scroll_to_top: bool,

    // Details
    detail: Option<CatalogItem>,

    // Login form
    login_username: String,
    login_password: String,
    show_password: bool,
    login_notice: Option<(String, Instant)>,

    status_message: String,

    // Background tasks
    task_sender: Sender<TaskResult>,
    task_receiver: Receiver<TaskResult>,
    egui_ctx: egui::Context,
}

impl MovieExplorerApp {
    fn new(egui_ctx: egui::Context, config: AppConfig) -> Self {
        let (task_sender, task_receiver) = channel();
        let client = Arc::new(TmdbClient::new(
            &config.api_base_url,
            config.effective_api_key(),
            &config.language,
            config.request_timeout(),
        ));
        let store_dir = config::store_dir();
        let favorites = FavoritesStore::load(FileStore::new(&store_dir));
        let sessions = SessionStore::load(FileStore::new(&store_dir));
        let browse = BrowseController::new(BrowseConfig::new(config.compact_layout, config.search_debounce()));

        let mut app = Self {
            config,
            client,
            favorites,
            sessions,
            view: View::Home,
            redirect_after_login: None,
            browse,
            query_input: String::new(),
            filter_draft: FilterCriteria::default(),
            genres: Vec::new(),
            years: year_options(chrono::Utc::now().year()),
            scroll_to_top: false,
            detail: None,
            login_username: String::new(),
            login_password: String::new(),
            show_password: false,
            login_notice: None,
            status_message: String::new(),
            task_sender,
            task_receiver,
            egui_ctx,
        };
        app.mount_home();
        app.fetch_genres();
        app
    }

    fn fetch_context(&self) -> FetchContext {
        FetchContext {
            client: Arc::clone(&self.client),
            sender: self.task_sender.clone(),
            egui_ctx: self.egui_ctx.clone(),
        }
    }

    /// Run a controller request on a worker thread
    fn execute(&self, request: FetchRequest) {
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match request {
                FetchRequest::Trending { generation } => TaskResult::TrendingLoaded {
                    generation,
                    items: ctx.client.fetch_trending(),
                },
                FetchRequest::Search { generation, query, page } => TaskResult::SearchLoaded {
                    generation,
                    page: ctx.client.search_by_title(&query, page),
                },
            };
            ctx.send(result);
        });
    }

    fn fetch_genres(&self) {
        let ctx = self.fetch_context();
        thread::spawn(move || match ctx.client.fetch_genres() {
            Ok(genres) => ctx.send(TaskResult::GenresLoaded(genres)),
            Err(e) => ctx.send(TaskResult::Error(format!("Failed to load genres: {}", e))),
        });
    }

    fn fetch_details(&self, id: i64) {
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let item = ctx.client.fetch_details(id);
            ctx.send(TaskResult::DetailsLoaded { id, item });
        });
    }

    /// Browse state lives only as long as the home view is shown
    fn mount_home(&mut self) {
        self.browse = BrowseController::new(BrowseConfig::new(
            self.config.compact_layout,
            self.config.search_debounce(),
        ));
        self.query_input.clear();
        self.filter_draft = FilterCriteria::default();
        self.scroll_to_top = false;
        let request = self.browse.mount();
        self.execute(request);
    }

    fn navigate(&mut self, view: View) {
        if view.requires_session() && !self.sessions.is_logged_in() {
            log::debug!("{:?} requires login", view);
            self.redirect_after_login = Some(view);
            self.view = View::Login;
            return;
        }
        match view {
            View::Home => self.mount_home(),
            View::Details(id) => {
                self.detail = None;
                self.fetch_details(id);
            }
            View::Favorites | View::Login => {}
        }
        self.view = view;
    }

    fn submit_login(&mut self) {
        if let Err(e) = validate_login(&self.login_username, &self.login_password) {
            self.login_notice = Some((e.to_string(), Instant::now()));
            return;
        }
        match self.sessions.login(&self.login_username) {
            Ok(_) => {
                self.login_password.clear();
                self.login_notice = None;
                let target = self.redirect_after_login.take().unwrap_or(View::Home);
                self.navigate(target);
            }
            Err(e) => {
                log::error!("Login failed: {}", e);
                self.login_notice = Some((e.to_string(), Instant::now()));
            }
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.sessions.logout() {
            log::error!("Failed to clear session: {}", e);
        }
        if self.view.requires_session() {
            self.navigate(View::Home);
        }
    }

    fn toggle_favorite(&mut self, item: &CatalogItem) {
        if let Err(e) = self.favorites.toggle(item) {
            log::error!("Failed to save favorites: {}", e);
            self.status_message = format!("Failed to save favorites: {}", e);
        }
    }

    fn apply_card_action(&mut self, action: Option<CardAction>) {
        match action {
            Some(CardAction::Open(id)) => self.navigate(View::Details(id)),
            Some(CardAction::ToggleFavorite(item)) => self.toggle_favorite(&item),
            None => {}
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::TrendingLoaded { generation, items } => {
                self.browse.on_trending_loaded(generation, items);
            }
            TaskResult::SearchLoaded { generation, page } => {
                self.browse.on_search_page_loaded(generation, page);
            }
            TaskResult::DetailsLoaded { id, item } => {
                if self.view == View::Details(id) {
                    self.detail = item;
                } else {
                    log::debug!("Ignoring details of {} after navigating away", id);
                }
            }
            TaskResult::GenresLoaded(genres) => {
                log::info!("Loaded {} genres", genres.len());
                self.genres = genres;
            }
            TaskResult::Error(msg) => {
                log::warn!("{}", msg);
                self.status_message = msg;
            }
        }
    }
}

impl eframe::App for MovieExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(result) = self.task_receiver.try_recv() {
            self.handle_task_result(result);
        }

        if let Some(request) = self.browse.poll(Instant::now()) {
            self.execute(request);
        }
        if let Some(deadline) = self.browse.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        // Apply theme
        if self.config.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("nav_panel").show(ctx, |ui| {
            ui.add_space(5.0);
            self.show_navbar(ui);
            ui.add_space(5.0);
        });

        if !self.status_message.is_empty() {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.status_message).weak());
                    if ui.small_button("✖").clicked() {
                        self.status_message.clear();
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view.clone() {
            View::Home => self.show_home(ui),
            View::Details(id) => self.show_details(ui, id),
            View::Favorites => self.show_favorites(ui),
            View::Login => self.show_login(ui),
        });
    }
}

impl MovieExplorerApp {
    fn show_navbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🎬 Movie Explorer").strong().size(18.0));
            ui.separator();

            if ui.selectable_label(self.view == View::Home, "🏠 Home").clicked() {
                self.navigate(View::Home);
            }
            let favorites_label = format!("❤ Favorites ({})", self.favorites.len());
            if ui.selectable_label(self.view == View::Favorites, favorites_label).clicked() {
                self.navigate(View::Favorites);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.checkbox(&mut self.config.dark_mode, "🌙 Dark").changed() {
                    self.config.save();
                }
                ui.separator();
                let username = self.sessions.current().map(|s| s.username.clone());
                match username {
                    Some(username) => {
                        if ui.button("🚪 Logout").clicked() {
                            self.logout();
                        }
                        ui.label(format!("👤 {}", username));
                    }
                    None => {
                        if ui.button("🔑 Login").clicked() {
                            self.navigate(View::Login);
                        }
                    }
                }
            });
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.heading(results_heading(self.browse.query(), self.config.compact_layout));
        ui.add_space(5.0);

        let search = ui.add(
            egui::TextEdit::singleline(&mut self.query_input)
                .hint_text("🔍 Search movies...")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.browse.on_query_changed(self.query_input.clone(), Instant::now());
        }

        self.show_filter_panel(ui);
        self.browse.set_filters(self.filter_draft.clone());
        ui.separator();

        let mut scroll_area = egui::ScrollArea::vertical()
            .id_salt("home_scroll")
            .auto_shrink([false, false]);
        if self.scroll_to_top {
            scroll_area = scroll_area.vertical_scroll_offset(0.0);
            self.scroll_to_top = false;
        }

        let mut action = None;
        let mut load_more = false;
        let browse = &self.browse;
        let favorites = &self.favorites;
        let image_base = self.config.image_base_url.as_str();
        let scroll_output = scroll_area.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            if browse.filtered_len() == 0 && !browse.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("No movies found").size(16.0).weak());
                });
            }

            action = show_card_grid(ui, browse.visible_items(), favorites, image_base);

            if browse.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.add(egui::Spinner::new().size(32.0));
                });
            }
            if browse.can_load_more() {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    if ui.button("Load More").clicked() {
                        load_more = true;
                    }
                });
            }
            ui.add_space(20.0);
        });

        let metrics = ScrollMetrics {
            offset: scroll_output.state.offset.y,
            viewport_height: scroll_output.inner_rect.height(),
            content_height: scroll_output.content_size.y,
        };
        if let Some(request) = self.browse.on_scroll(metrics) {
            self.execute(request);
        }
        if load_more {
            self.browse.load_more();
        }

        if self.browse.show_scroll_to_top() {
            egui::Area::new(egui::Id::new("scroll_to_top"))
                .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -24.0])
                .show(ui.ctx(), |ui| {
                    if ui.button(egui::RichText::new("⬆").size(20.0)).on_hover_text("Back to top").clicked() {
                        self.scroll_to_top = true;
                    }
                });
        }

        self.apply_card_action(action);
    }

    fn show_filter_panel(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("⚙ Filters")
            .default_open(!self.config.compact_layout)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    let genre_text = self
                        .filter_draft
                        .genre
                        .and_then(|id| self.genres.iter().find(|g| g.id == id))
                        .map(|g| g.name.clone())
                        .unwrap_or_else(|| "All".to_string());
                    ui.label("Genre:");
                    egui::ComboBox::from_id_salt("genre_filter")
                        .selected_text(genre_text)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.filter_draft.genre, None, "All");
                            for genre in &self.genres {
                                ui.selectable_value(&mut self.filter_draft.genre, Some(genre.id), &genre.name);
                            }
                        });

                    let year_text = self
                        .filter_draft
                        .year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "All".to_string());
                    ui.label("Year:");
                    egui::ComboBox::from_id_salt("year_filter")
                        .selected_text(year_text)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.filter_draft.year, None, "All");
                            for year in &self.years {
                                ui.selectable_value(&mut self.filter_draft.year, Some(*year), year.to_string());
                            }
                        });

                    ui.label("Min rating:");
                    ui.add(egui::Slider::new(&mut self.filter_draft.min_rating, 0.0..=10.0).step_by(0.5));

                    if ui.button("Reset").clicked() {
                        self.filter_draft = FilterCriteria::default();
                    }
                });
            });
    }

    fn show_details(&mut self, ui: &mut egui::Ui, id: i64) {
        if ui.button("⬅ Back").clicked() {
            self.navigate(View::Home);
            return;
        }
        ui.separator();

        // Stays on the spinner when the lookup failed
        let Some(item) = self.detail.as_ref().filter(|item| item.id == id) else {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.add(egui::Spinner::new().size(40.0));
            });
            return;
        };

        let mut toggle = false;
        let mut open_trailer = None;
        let is_favorite = self.favorites.is_favorite(item.id);
        let image_base = self.config.image_base_url.as_str();

        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if item.backdrop_path.is_some() {
                    let width = ui.available_width();
                    ui.add(
                        egui::Image::new(image_url(image_base, ImageSize::Original, item.backdrop_path.as_deref()))
                            .fit_to_exact_size(egui::vec2(width, width * 9.0 / 16.0 * 0.5)),
                    );
                    ui.add_space(10.0);
                }

                ui.horizontal_top(|ui| {
                    ui.add(
                        egui::Image::new(image_url(image_base, ImageSize::Poster, item.poster_path.as_deref()))
                            .fit_to_exact_size(egui::vec2(CARD_WIDTH * 1.5, POSTER_HEIGHT * 1.5)),
                    );
                    ui.add_space(15.0);

                    ui.vertical(|ui| {
                        ui.heading(egui::RichText::new(&item.title).strong().size(24.0));
                        ui.horizontal(|ui| {
                            if let Some(date) = &item.release_date {
                                ui.label(format!("📅 {}", date));
                            }
                            if let Some(runtime) = item.runtime_label() {
                                ui.label(format!("⏱ {}", runtime));
                            }
                            ui.label(
                                egui::RichText::new(format!("★ {}", item.rating_label()))
                                    .color(egui::Color32::GOLD),
                            );
                        });
                        if !item.genres.is_empty() {
                            let names: Vec<&str> = item.genres.iter().map(|g| g.name.as_str()).collect();
                            ui.label(egui::RichText::new(names.join(" • ")).weak());
                        }
                        ui.add_space(10.0);
                        ui.label(&item.overview);
                        ui.add_space(10.0);

                        ui.horizontal(|ui| {
                            if let Some(key) = &item.trailer_key {
                                if ui.button("▶ Watch Trailer").clicked() {
                                    open_trailer = Some(trailer_url(key));
                                }
                            }
                            let fav_text = if is_favorite {
                                egui::RichText::new("★ Remove from Favorites").color(egui::Color32::GOLD)
                            } else {
                                egui::RichText::new("☆ Add to Favorites")
                            };
                            if ui.button(fav_text).clicked() {
                                toggle = true;
                            }
                        });
                    });
                });
            });

        if let Some(url) = open_trailer {
            log::info!("Opening trailer {}", url);
            ui.ctx().open_url(egui::OpenUrl::new_tab(url));
        }
        if toggle {
            let item = item.clone();
            self.toggle_favorite(&item);
        }
    }

    fn show_favorites(&mut self, ui: &mut egui::Ui) {
        let mut clear_all = false;
        ui.horizontal(|ui| {
            ui.heading("My Favorites");
            if !self.favorites.is_empty() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🗑 Clear All").clicked() {
                        clear_all = true;
                    }
                });
            }
        });
        ui.separator();

        if self.favorites.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("You have no favorite movies yet.").size(16.0).weak());
            });
        } else {
            let favorites = &self.favorites;
            let image_base = self.config.image_base_url.as_str();
            let action = egui::ScrollArea::vertical()
                .id_salt("favorites_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| show_card_grid(ui, favorites.list().iter(), favorites, image_base))
                .inner;
            self.apply_card_action(action);
        }

        if clear_all {
            if let Err(e) = self.favorites.clear() {
                log::error!("Failed to clear favorites: {}", e);
                self.status_message = format!("Failed to clear favorites: {}", e);
            }
        }
    }

    fn show_login(&mut self, ui: &mut egui::Ui) {
        match self.login_notice.as_ref().map(|(_, shown_at)| shown_at.elapsed()) {
            Some(elapsed) if elapsed >= NOTICE_DURATION => self.login_notice = None,
            Some(elapsed) => ui.ctx().request_repaint_after(NOTICE_DURATION - elapsed),
            None => {}
        }

        let mut submit = false;
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading("🔑 Login");
            ui.add_space(20.0);

            if let Some(message) = self.login_notice.as_ref().map(|(message, _)| message.clone()) {
                let mut dismiss = false;
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(egui::Color32::from_rgb(230, 80, 80), message);
                        if ui.small_button("✖").clicked() {
                            dismiss = true;
                        }
                    });
                });
                if dismiss {
                    self.login_notice = None;
                }
                ui.add_space(10.0);
            }

            ui.add(
                egui::TextEdit::singleline(&mut self.login_username)
                    .hint_text("Username")
                    .desired_width(260.0),
            );
            ui.horizontal(|ui| {
                let password = ui.add(
                    egui::TextEdit::singleline(&mut self.login_password)
                        .hint_text("Password")
                        .password(!self.show_password)
                        .desired_width(260.0),
                );
                if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                let eye = if self.show_password { "🙈" } else { "👁" };
                if ui.button(eye).on_hover_text("Show/hide password").clicked() {
                    self.show_password = !self.show_password;
                }
            });
            ui.add_space(10.0);
            if ui.button("Login").clicked() {
                submit = true;
            }
            ui.add_space(5.0);
            ui.label(egui::RichText::new("Any username and password will do").weak());
        });

        if submit {
            self.submit_login();
        }
    }
}

/// Poster grid shared by the home and favorites views
fn show_card_grid<'a>(
    ui: &mut egui::Ui,
    items: impl Iterator<Item = &'a CatalogItem>,
    favorites: &FavoritesStore<FileStore>,
    image_base: &str,
) -> Option<CardAction> {
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
        for item in items {
            ui.allocate_ui(egui::vec2(CARD_WIDTH, POSTER_HEIGHT + 80.0), |ui| {
                ui.vertical(|ui| {
                    ui.set_width(CARD_WIDTH);
                    let poster = ui
                        .add(
                            egui::Image::new(image_url(image_base, ImageSize::Poster, item.poster_path.as_deref()))
                                .fit_to_exact_size(egui::vec2(CARD_WIDTH, POSTER_HEIGHT))
                                .sense(egui::Sense::click()),
                        )
                        .on_hover_cursor(egui::CursorIcon::PointingHand);
                    if poster.clicked() {
                        action = Some(CardAction::Open(item.id));
                    }

                    ui.add(egui::Label::new(egui::RichText::new(&item.title).strong()).truncate());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(item.release_year().unwrap_or("N/A")).weak());
                        ui.label(
                            egui::RichText::new(format!("★ {}", item.rating_label())).color(egui::Color32::GOLD),
                        );
                        let is_fav = favorites.is_favorite(item.id);
                        let fav_text = if is_fav {
                            egui::RichText::new("❤").color(egui::Color32::from_rgb(230, 60, 60))
                        } else {
                            egui::RichText::new("♡").color(egui::Color32::GRAY)
                        };
                        let hover = if is_fav { "Remove from favorites" } else { "Add to favorites" };
                        if ui.small_button(fav_text).on_hover_text(hover).clicked() {
                            action = Some(CardAction::ToggleFavorite(item.clone()));
                        }
                    });
                });
            });
        }
    });
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_heading() {
        assert_eq!(results_heading("  ", false), "Trending Now");
        assert_eq!(results_heading("alien", true), "Results for \"alien\"");
        assert_eq!(
            results_heading("the lord of the rings", false),
            "Results for \"the lord of the rings\""
        );
        assert_eq!(
            results_heading("the lord of the rings", true),
            "Results for \"the lord of the...\""
        );
    }

    #[test]
    fn test_year_options() {
        let years = year_options(2024);
        assert_eq!(years.len(), 50);
        assert_eq!(years.first(), Some(&2024));
        assert_eq!(years.last(), Some(&1975));
    }
}
