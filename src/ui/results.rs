use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::summary::SummaryResult;

/// Handles returned from building the results page.
#[derive(Clone)]
pub struct ResultsWidgets {
    pub root: gtk4::Box,
    pub time_label: gtk4::Label,
    pub summary_label: gtk4::Label,
    pub items_group: libadwaita::PreferencesGroup,
    pub items_list: gtk4::ListBox,
    pub action_count_label: gtk4::Label,
    pub topic_count_label: gtk4::Label,
    pub topics_group: libadwaita::PreferencesGroup,
    pub topics_list: gtk4::ListBox,
    pub copy_button: gtk4::Button,
    pub txt_button: gtk4::Button,
    pub json_button: gtk4::Button,
    pub another_button: gtk4::Button,
}

/// Build the results page. Signal wiring happens in main.
pub fn build_results_page() -> ResultsWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 0);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    // --- Header ---
    let check = gtk4::Image::from_icon_name("emblem-ok-symbolic");
    check.set_pixel_size(48);
    check.add_css_class("success");
    check.set_margin_top(12);
    content.append(&check);

    let title = gtk4::Label::new(Some("Summary Ready!"));
    title.add_css_class("title-1");
    title.set_margin_top(6);
    content.append(&title);

    let blurb = gtk4::Label::new(Some(
        "Your transcript has been successfully processed and summarized. \
         Review the key insights below and export in your preferred format.",
    ));
    blurb.add_css_class("dim-label");
    blurb.set_wrap(true);
    blurb.set_justify(gtk4::Justification::Center);
    blurb.set_margin_top(6);
    content.append(&blurb);

    // --- Generated summary ---
    let summary_group = libadwaita::PreferencesGroup::new();
    summary_group.set_title("Generated Summary");
    summary_group.set_margin_top(16);

    let time_label = gtk4::Label::new(None);
    time_label.add_css_class("dim-label");
    summary_group.set_header_suffix(Some(&time_label));

    let summary_row = libadwaita::ActionRow::new();
    let summary_label = gtk4::Label::new(None);
    summary_label.set_wrap(true);
    summary_label.set_xalign(0.0);
    summary_label.set_selectable(true);
    summary_label.set_margin_top(8);
    summary_label.set_margin_bottom(8);
    summary_label.set_margin_start(8);
    summary_label.set_margin_end(8);
    summary_row.set_child(Some(&summary_label));
    summary_group.add(&summary_row);

    content.append(&summary_group);

    // --- Export controls ---
    let button_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    button_box.set_halign(gtk4::Align::Center);
    button_box.set_margin_top(12);

    let copy_button = gtk4::Button::builder().label("Copy Summary").build();
    copy_button.add_css_class("suggested-action");
    button_box.append(&copy_button);

    let txt_button = gtk4::Button::builder().label("Download as .txt").build();
    button_box.append(&txt_button);

    let json_button = gtk4::Button::builder().label("Download as .json").build();
    button_box.append(&json_button);

    content.append(&button_box);

    // --- Action items ---
    let items_group = libadwaita::PreferencesGroup::new();
    items_group.set_title("Action Items");
    items_group.set_margin_top(16);

    let items_list = gtk4::ListBox::new();
    items_list.set_selection_mode(gtk4::SelectionMode::None);
    items_list.add_css_class("boxed-list");
    items_group.add(&items_list);

    content.append(&items_group);

    // --- Processing statistics ---
    let stats_group = libadwaita::PreferencesGroup::new();
    stats_group.set_title("Processing Statistics");
    stats_group.set_margin_top(16);

    let action_count_row = libadwaita::ActionRow::builder()
        .title("Action Items")
        .build();
    let action_count_label = gtk4::Label::new(None);
    action_count_label.add_css_class("dim-label");
    action_count_row.add_suffix(&action_count_label);
    stats_group.add(&action_count_row);

    let topic_count_row = libadwaita::ActionRow::builder().title("Topics").build();
    let topic_count_label = gtk4::Label::new(None);
    topic_count_label.add_css_class("dim-label");
    topic_count_row.add_suffix(&topic_count_label);
    stats_group.add(&topic_count_row);

    content.append(&stats_group);

    // --- Topics ---
    let topics_group = libadwaita::PreferencesGroup::new();
    topics_group.set_title("Topics Covered");
    topics_group.set_margin_top(16);

    let topics_list = gtk4::ListBox::new();
    topics_list.set_selection_mode(gtk4::SelectionMode::None);
    topics_list.add_css_class("boxed-list");
    topics_group.add(&topics_list);

    content.append(&topics_group);

    // --- New transcript ---
    let another_button = gtk4::Button::builder()
        .label("Summarize Another Transcript")
        .build();
    another_button.add_css_class("pill");
    another_button.set_halign(gtk4::Align::Center);
    another_button.set_margin_top(16);
    content.append(&another_button);

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .vexpand(true)
        .child(&content)
        .build();
    root.append(&scrolled);

    ResultsWidgets {
        root,
        time_label,
        summary_label,
        items_group,
        items_list,
        action_count_label,
        topic_count_label,
        topics_group,
        topics_list,
        copy_button,
        txt_button,
        json_button,
        another_button,
    }
}

/// Fill the page with one summary. Empty sections collapse.
pub fn show_result(widgets: &ResultsWidgets, result: &SummaryResult) {
    widgets.time_label.set_text(&format!(
        "Processed in {}",
        result.processing_stats.processing_time
    ));
    widgets.summary_label.set_text(&result.summary);

    widgets.items_list.remove_all();
    for item in &result.action_items {
        let row = libadwaita::ActionRow::builder()
            .title(&item.text)
            .subtitle(&format!("Owner: {} • Due: {}", item.owner, item.due))
            .build();
        row.set_use_markup(false);
        widgets.items_list.append(&row);
    }
    widgets.items_group.set_visible(!result.action_items.is_empty());

    widgets
        .action_count_label
        .set_text(&result.action_items.len().to_string());
    widgets
        .topic_count_label
        .set_text(&result.topics.len().to_string());

    widgets.topics_list.remove_all();
    for topic in &result.topics {
        let row = libadwaita::ActionRow::builder().title(topic).build();
        row.set_use_markup(false);
        widgets.topics_list.append(&row);
    }
    widgets.topics_group.set_visible(!result.topics.is_empty());
}
