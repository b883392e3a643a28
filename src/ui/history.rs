use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::export;
use crate::summary::HistoryEntry;

/// Show a modal window listing this session's summaries, newest first.
pub fn show_history_window(parent: &impl IsA<gtk4::Window>, entries: &[HistoryEntry]) {
    let window = libadwaita::Window::builder()
        .title("Session History")
        .default_width(520)
        .default_height(560)
        .transient_for(parent)
        .modal(true)
        .build();

    let toast_overlay = libadwaita::ToastOverlay::new();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    // Back button in header
    let back_btn = gtk4::Button::from_icon_name("go-previous-symbolic");
    back_btn.set_tooltip_text(Some("Back to main"));
    let win_for_back = window.clone();
    back_btn.connect_clicked(move |_| {
        win_for_back.close();
    });
    header.pack_start(&back_btn);

    toolbar_view.add_top_bar(&header);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    if entries.is_empty() {
        let empty_label = gtk4::Label::new(Some("No summaries yet this session."));
        empty_label.add_css_class("dim-label");
        empty_label.set_vexpand(true);
        empty_label.set_valign(gtk4::Align::Center);
        content.append(&empty_label);
    } else {
        let group = libadwaita::PreferencesGroup::new();
        group.set_title("Recent Summaries");

        for entry in entries {
            let row = build_entry_row(entry, &toast_overlay);
            group.add(&row);
        }

        content.append(&group);
    }

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&content)
        .build();
    toolbar_view.set_content(Some(&scrolled));
    toast_overlay.set_child(Some(&toolbar_view));
    window.set_content(Some(&toast_overlay));
    window.present();
}

/// Build an ExpanderRow for a single history entry.
fn build_entry_row(
    entry: &HistoryEntry,
    toast_overlay: &libadwaita::ToastOverlay,
) -> libadwaita::ExpanderRow {
    let row = libadwaita::ExpanderRow::builder()
        .title(&display_timestamp(&entry.timestamp))
        .build();
    row.set_use_markup(false);

    // Truncated subtitle preview
    let summary = &entry.result.summary;
    let preview: String = if summary.chars().count() > 100 {
        let cut: String = summary.chars().take(100).collect();
        format!("{cut}...")
    } else {
        summary.clone()
    };
    row.set_subtitle(&preview);

    // Action item count suffix
    let count_label = gtk4::Label::new(Some(&format!(
        "{} action items",
        entry.result.action_items.len()
    )));
    count_label.add_css_class("dim-label");
    row.add_suffix(&count_label);

    // Copy button suffix
    let copy_btn = gtk4::Button::from_icon_name("edit-copy-symbolic");
    copy_btn.set_valign(gtk4::Align::Center);
    copy_btn.set_tooltip_text(Some("Copy to clipboard"));

    let text_for_copy = export::clipboard_text(&entry.result);
    let toast_for_copy = toast_overlay.clone();
    copy_btn.connect_clicked(move |_| {
        let _ = crate::clipboard::copy_text(&text_for_copy);
        let toast = libadwaita::Toast::new("Summary copied to clipboard");
        toast.set_timeout(2);
        toast_for_copy.add_toast(toast);
    });
    row.add_suffix(&copy_btn);

    // Full summary child row (visible when expanded)
    let full_text_row = libadwaita::ActionRow::new();
    let label = gtk4::Label::new(Some(summary));
    label.set_wrap(true);
    label.set_xalign(0.0);
    label.set_margin_top(4);
    label.set_margin_bottom(4);
    label.set_margin_start(8);
    label.set_margin_end(8);
    label.set_selectable(true);
    full_text_row.set_child(Some(&label));
    row.add_row(&full_text_row);

    row
}

/// Local-time display form of a stored RFC 3339 timestamp.
fn display_timestamp(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::display_timestamp;

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(display_timestamp("not a date"), "not a date");
    }

    #[test]
    fn rfc3339_timestamps_are_reformatted() {
        let shown = display_timestamp("2025-03-14T09:26:53+00:00");
        assert_eq!(shown.len(), "2025-03-14 09:26:53".len());
        assert!(shown.contains(' '));
        assert!(!shown.contains('T'));
    }
}
