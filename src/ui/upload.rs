use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles returned from building the upload page.
#[derive(Clone)]
pub struct UploadWidgets {
    pub root: gtk4::Box,
    pub text_view: gtk4::TextView,
    pub choose_button: gtk4::Button,
    pub file_row: libadwaita::ActionRow,
    pub remove_file_button: gtk4::Button,
    pub submit_button: gtk4::Button,
    pub clear_button: gtk4::Button,
    pub spinner: gtk4::Spinner,
    pub error_banner: libadwaita::Banner,
    pub server_url_row: libadwaita::EntryRow,
    pub server_status_label: gtk4::Label,
    pub stats_label: gtk4::Label,
}

/// What the upload page currently shows, derived from session state.
pub struct UploadView {
    pub text: String,
    /// Display line for the attached file, when one is attached.
    pub file: Option<String>,
    pub is_processing: bool,
    pub can_submit: bool,
    pub error: Option<String>,
    pub stats_line: String,
}

/// Build the upload page. Signal wiring happens in main.
pub fn build_upload_page(initial_server_url: &str) -> UploadWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 0);

    let error_banner = libadwaita::Banner::new("");
    // Error text comes from the service; render it literally.
    error_banner.set_use_markup(false);
    error_banner.set_button_label(Some("Dismiss"));
    root.append(&error_banner);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    // --- Headline ---
    let title = gtk4::Label::new(Some("Transform Transcripts into Insights"));
    title.add_css_class("title-1");
    title.set_wrap(true);
    title.set_justify(gtk4::Justification::Center);
    title.set_margin_top(12);
    content.append(&title);

    let subtitle = gtk4::Label::new(Some(
        "Upload or paste your audio transcripts and get intelligent summaries \
         in seconds. Perfect for meetings, interviews, lectures, and research.",
    ));
    subtitle.add_css_class("dim-label");
    subtitle.set_wrap(true);
    subtitle.set_justify(gtk4::Justification::Center);
    subtitle.set_margin_top(6);
    content.append(&subtitle);

    // --- Transcript group ---
    let transcript_group = libadwaita::PreferencesGroup::new();
    transcript_group.set_title("Transcript Content");
    transcript_group.set_description(Some(
        "Paste your transcript text below or upload a file. \
         Supports .txt, .docx, and .pdf formats.",
    ));
    transcript_group.set_margin_top(16);

    let text_view = gtk4::TextView::new();
    text_view.set_wrap_mode(gtk4::WrapMode::WordChar);
    text_view.set_top_margin(8);
    text_view.set_bottom_margin(8);
    text_view.set_left_margin(8);
    text_view.set_right_margin(8);

    let text_scroll = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .min_content_height(180)
        .child(&text_view)
        .build();
    text_scroll.add_css_class("card");
    transcript_group.add(&text_scroll);

    content.append(&transcript_group);

    // --- File group ---
    let file_group = libadwaita::PreferencesGroup::new();
    file_group.set_margin_top(16);

    let choose_button = gtk4::Button::builder()
        .label("Choose File")
        .valign(gtk4::Align::Center)
        .build();

    let upload_row = libadwaita::ActionRow::builder()
        .title("Upload a file")
        .subtitle("TXT, DOCX, PDF up to 10MB")
        .activatable(true)
        .build();
    upload_row.add_prefix(&gtk4::Image::from_icon_name("document-open-symbolic"));
    upload_row.add_suffix(&choose_button);
    upload_row.set_activatable_widget(Some(&choose_button));
    file_group.add(&upload_row);

    let remove_file_button = gtk4::Button::from_icon_name("window-close-symbolic");
    remove_file_button.set_valign(gtk4::Align::Center);
    remove_file_button.set_tooltip_text(Some("Remove file"));
    remove_file_button.add_css_class("flat");

    // Filenames are untrusted text, never markup.
    let file_row = libadwaita::ActionRow::builder()
        .title("No file attached")
        .build();
    file_row.set_use_markup(false);
    file_row.add_prefix(&gtk4::Image::from_icon_name("text-x-generic-symbolic"));
    file_row.add_suffix(&remove_file_button);
    file_row.set_visible(false);
    file_group.add(&file_row);

    content.append(&file_group);

    // --- Submit ---
    let submit_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    submit_box.set_halign(gtk4::Align::Center);
    submit_box.set_margin_top(16);

    let spinner = gtk4::Spinner::new();
    spinner.set_visible(false);
    submit_box.append(&spinner);

    let submit_button = gtk4::Button::builder()
        .label("Summarize Transcript")
        .build();
    submit_button.add_css_class("suggested-action");
    submit_button.add_css_class("pill");
    submit_button.set_sensitive(false);
    submit_box.append(&submit_button);

    let clear_button = gtk4::Button::builder().label("Clear").build();
    clear_button.add_css_class("flat");
    submit_box.append(&clear_button);

    content.append(&submit_box);

    // --- Service group ---
    let service_group = libadwaita::PreferencesGroup::new();
    service_group.set_title("Summarization Service");
    service_group.set_margin_top(16);

    let server_url_row = libadwaita::EntryRow::builder()
        .title("Service URL")
        .build();
    server_url_row.set_text(initial_server_url);
    server_url_row.set_show_apply_button(true);
    service_group.add(&server_url_row);

    let status_row = libadwaita::ActionRow::builder().title("Status").build();
    let server_status_label = gtk4::Label::new(Some("Checking..."));
    server_status_label.add_css_class("dim-label");
    status_row.add_suffix(&server_status_label);
    service_group.add(&status_row);

    let stats_row = libadwaita::ActionRow::builder().title("All Time").build();
    let stats_label = gtk4::Label::new(None);
    stats_label.add_css_class("dim-label");
    stats_row.add_suffix(&stats_label);
    service_group.add(&stats_row);

    content.append(&service_group);

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .vexpand(true)
        .child(&content)
        .build();
    root.append(&scrolled);

    UploadWidgets {
        root,
        text_view,
        choose_button,
        file_row,
        remove_file_button,
        submit_button,
        clear_button,
        spinner,
        error_banner,
        server_url_row,
        server_status_label,
        stats_label,
    }
}

/// Bring the page in line with `view`. The buffer is only rewritten when
/// its contents differ, so the changed signal settles instead of looping.
pub fn sync(widgets: &UploadWidgets, view: &UploadView) {
    let buffer = widgets.text_view.buffer();
    let current = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
    if current.as_str() != view.text {
        buffer.set_text(&view.text);
    }

    match &view.file {
        Some(line) => {
            widgets.file_row.set_title(line);
            widgets.file_row.set_visible(true);
        }
        None => widgets.file_row.set_visible(false),
    }

    widgets.submit_button.set_label(if view.is_processing {
        "Processing..."
    } else {
        "Summarize Transcript"
    });
    widgets.submit_button.set_sensitive(view.can_submit);
    widgets.spinner.set_visible(view.is_processing);
    widgets.spinner.set_spinning(view.is_processing);
    widgets.text_view.set_editable(!view.is_processing);
    widgets.choose_button.set_sensitive(!view.is_processing);
    widgets.remove_file_button.set_sensitive(!view.is_processing);
    widgets.clear_button.set_sensitive(!view.is_processing);

    match &view.error {
        Some(message) => {
            widgets.error_banner.set_title(message);
            widgets.error_banner.set_revealed(true);
        }
        None => widgets.error_banner.set_revealed(false),
    }

    widgets.stats_label.set_text(&view.stats_line);
}

/// Update the service status row after a health probe.
pub fn set_server_status(widgets: &UploadWidgets, healthy: bool) {
    if healthy {
        widgets.server_status_label.set_text("Connected");
        widgets.server_status_label.set_css_classes(&["success"]);
    } else {
        widgets.server_status_label.set_text("Unreachable");
        widgets.server_status_label.set_css_classes(&["error"]);
    }
}
