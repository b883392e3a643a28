mod app;
mod clipboard;
mod config;
mod export;
mod gateway;
mod input;
mod stats;
mod summary;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use app::{AppContext, BackendEvent};

fn main() {
    env_logger::init();
    log::info!("Transcript Insight starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.transcript-insight")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Async channel for backend → UI communication
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    let ctx = Rc::new(RefCell::new(AppContext::new(backend_tx)));

    // --- Window chrome ---
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("Transcript Insight")
        .default_width(560)
        .default_height(720)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let back_button = gtk4::Button::from_icon_name("go-previous-symbolic");
    back_button.set_tooltip_text(Some("Back to upload"));
    back_button.set_visible(false);
    header.pack_start(&back_button);

    let menu_button = gtk4::MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");

    let menu = gtk4::gio::Menu::new();
    menu.append(Some("About Transcript Insight"), Some("app.about"));
    menu.append(Some("Clear Session"), Some("app.clear-session"));
    menu.append(Some("Quit"), Some("app.quit"));

    menu_button.set_menu_model(Some(&menu));
    header.pack_end(&menu_button);

    let history_button = gtk4::Button::from_icon_name("document-open-recent-symbolic");
    history_button.set_tooltip_text(Some("Session history"));
    header.pack_end(&history_button);

    toolbar_view.add_top_bar(&header);

    // --- Pages ---
    let upload = ui::upload::build_upload_page(&ctx.borrow().config.api_base_url);
    let results = ui::results::build_results_page();

    let stack = gtk4::Stack::new();
    stack.set_transition_type(gtk4::StackTransitionType::Crossfade);
    stack.add_named(&upload.root, Some("upload"));
    stack.add_named(&results.root, Some("results"));

    let toast_overlay = libadwaita::ToastOverlay::new();
    toast_overlay.set_child(Some(&stack));
    toolbar_view.set_content(Some(&toast_overlay));
    window.set_content(Some(&toolbar_view));

    // Header back button follows the visible page
    {
        let back = back_button.clone();
        stack.connect_visible_child_name_notify(move |stack| {
            back.set_visible(stack.visible_child_name().as_deref() == Some("results"));
        });
    }
    {
        let ctx_clone = ctx.clone();
        back_button.connect_clicked(move |_| app::on_back(&ctx_clone));
    }

    // --- Upload page wiring ---
    {
        let ctx_clone = ctx.clone();
        upload.text_view.buffer().connect_changed(move |buffer| {
            let text = buffer
                .text(&buffer.start_iter(), &buffer.end_iter(), false)
                .to_string();
            app::on_text_edited(&ctx_clone, text);
        });
    }
    {
        let ctx_clone = ctx.clone();
        let parent = window.clone();
        upload.choose_button.connect_clicked(move |_| {
            let filter = gtk4::FileFilter::new();
            filter.set_name(Some("Transcripts (txt, docx, pdf)"));
            filter.add_suffix("txt");
            filter.add_suffix("docx");
            filter.add_suffix("pdf");
            let filters = gtk4::gio::ListStore::new::<gtk4::FileFilter>();
            filters.append(&filter);

            let dialog = gtk4::FileDialog::builder()
                .title("Choose a transcript")
                .filters(&filters)
                .build();

            let ctx_inner = ctx_clone.clone();
            dialog.open(Some(&parent), gtk4::gio::Cancellable::NONE, move |result| {
                if let Ok(file) = result {
                    if let Some(path) = file.path() {
                        app::on_file_picked(&ctx_inner, path);
                    }
                }
            });
        });
    }
    {
        let ctx_clone = ctx.clone();
        upload
            .remove_file_button
            .connect_clicked(move |_| app::on_remove_file(&ctx_clone));
    }
    {
        let ctx_clone = ctx.clone();
        upload
            .clear_button
            .connect_clicked(move |_| app::on_clear_input(&ctx_clone));
    }
    {
        let ctx_clone = ctx.clone();
        upload
            .submit_button
            .connect_clicked(move |_| app::on_submit(&ctx_clone));
    }
    {
        let ctx_clone = ctx.clone();
        upload
            .error_banner
            .connect_button_clicked(move |_| app::on_new_transcript(&ctx_clone));
    }
    {
        let ctx_clone = ctx.clone();
        upload.server_url_row.connect_apply(move |row| {
            app::on_server_url_applied(&ctx_clone, row.text().as_str());
        });
    }

    // --- Results page wiring ---
    {
        let ctx_clone = ctx.clone();
        results.copy_button.connect_clicked(move |_| {
            let summary = ctx_clone.borrow().state.summary.clone();
            if let Some(result) = summary {
                match clipboard::copy_text(&export::clipboard_text(&result)) {
                    Ok(()) => app::show_toast(&ctx_clone, "Summary copied to clipboard"),
                    Err(e) => log::error!("Clipboard error: {e}"),
                }
            }
        });
    }
    {
        let ctx_clone = ctx.clone();
        let parent = window.clone();
        results.txt_button.connect_clicked(move |_| {
            let summary = ctx_clone.borrow().state.summary.clone();
            if let Some(result) = summary {
                save_export(
                    &ctx_clone,
                    &parent,
                    export::TXT_FILENAME,
                    export::report_text(&result),
                );
            }
        });
    }
    {
        let ctx_clone = ctx.clone();
        let parent = window.clone();
        results.json_button.connect_clicked(move |_| {
            let summary = ctx_clone.borrow().state.summary.clone();
            if let Some(result) = summary {
                match export::json_text(&result) {
                    Ok(text) => save_export(&ctx_clone, &parent, export::JSON_FILENAME, text),
                    Err(e) => log::error!("Failed to render JSON export: {e}"),
                }
            }
        });
    }
    {
        let ctx_clone = ctx.clone();
        results
            .another_button
            .connect_clicked(move |_| app::on_new_transcript(&ctx_clone));
    }

    // Wire up the history button
    {
        let ctx_clone = ctx.clone();
        let parent = window.clone();
        history_button.connect_clicked(move |_| {
            let entries = ctx_clone.borrow().state.history.clone();
            ui::history::show_history_window(&parent, &entries);
        });
    }

    // --- Application actions ---
    {
        let win = window.clone();
        let about_action = gtk4::gio::SimpleAction::new("about", None);
        about_action.connect_activate(move |_, _| {
            let about = libadwaita::AboutWindow::builder()
                .application_name("Transcript Insight")
                .version(env!("CARGO_PKG_VERSION"))
                .developer_name("The Transcript Insight contributors")
                .license_type(gtk4::License::MitX11)
                .comments("Turn meeting transcripts into summaries, action items, and topics.")
                .transient_for(&win)
                .build();
            about.present();
        });
        app.add_action(&about_action);
    }
    {
        let ctx_clone = ctx.clone();
        let clear_action = gtk4::gio::SimpleAction::new("clear-session", None);
        clear_action.connect_activate(move |_, _| app::on_clear_session(&ctx_clone));
        app.add_action(&clear_action);
    }
    {
        let app_clone = app.clone();
        let quit_action = gtk4::gio::SimpleAction::new("quit", None);
        quit_action.connect_activate(move |_, _| app_clone.quit());
        app.add_action(&quit_action);
    }

    // Store UI handles in the context
    {
        let mut c = ctx.borrow_mut();
        c.stack = Some(stack);
        c.toast_overlay = Some(toast_overlay);
        c.upload = Some(upload);
        c.results = Some(results);
    }

    window.present();

    // Attach backend event handler
    {
        let ctx_clone = ctx.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&ctx_clone, event);
            }
        });
    }

    app::refresh(&ctx);
    app::dispatch_health_check(&ctx);
}

/// Ask where to save an export and write it out.
fn save_export(
    ctx: &Rc<RefCell<AppContext>>,
    parent: &libadwaita::ApplicationWindow,
    initial_name: &str,
    contents: String,
) {
    let dialog = gtk4::FileDialog::builder()
        .title("Save summary")
        .initial_name(initial_name)
        .build();

    let ctx_inner = ctx.clone();
    dialog.save(Some(parent), gtk4::gio::Cancellable::NONE, move |result| {
        if let Ok(file) = result {
            if let Some(path) = file.path() {
                match std::fs::write(&path, &contents) {
                    Ok(()) => app::show_toast(&ctx_inner, "Summary exported"),
                    Err(e) => {
                        log::error!("Failed to write {}: {e}", path.display());
                        app::show_toast(&ctx_inner, "Could not save the file");
                    }
                }
            }
        }
    });
}
