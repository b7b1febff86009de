use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::timestamps::format_listed_at;
use crate::explorer::ListingExplorer;
use crate::models::Property;
use crate::utils::sanitize_line;

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR: Color = Color::Rgb(24, 24, 27);

/// Per-frame view state owned by the app (everything not held by the explorer)
pub struct RenderState<'a> {
    pub input: &'a str,
    pub selected_idx: usize,
    pub filter_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, explorer: &ListingExplorer, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state.input);
    render_results_list(frame, layout.results_area, explorer, state.selected_idx);
    render_details(frame, layout.details_area, explorer.result(state.selected_idx));
    render_status_bar(frame, layout.status_area, explorer, state);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

fn render_input(frame: &mut Frame, area: Rect, input: &str) {
    let content = if input.is_empty() {
        Line::from(Span::styled(
            "city:pune rating:4 | fuzzy text   (Enter applies filters)",
            Style::default().fg(MUTED),
        ))
    } else {
        Line::from(input.to_string())
    };

    frame.render_widget(Paragraph::new(content).block(bordered(" Filter ")), area);
}

fn render_results_list(
    frame: &mut Frame,
    area: Rect,
    explorer: &ListingExplorer,
    selected_idx: usize,
) {
    if let Some(error) = explorer.load_error() {
        let paragraph = Paragraph::new(format!("Failed to load listings: {}", error))
            .style(Style::default().fg(ERROR))
            .block(bordered(" Listings "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = explorer.results().map(|p| ListItem::new(result_line(p))).collect();

    let list = List::new(items).block(bordered(" Listings ")).highlight_style(
        Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    if explorer.result_count() > 0 {
        list_state.select(Some(selected_idx));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// One row of the results list: price, title, address, rating
fn result_line(property: &Property) -> String {
    let price = property
        .min_price()
        .map(|p| format!("{:>6}", p))
        .unwrap_or_else(|| format!("{:>6}", "-"));
    let rating = property
        .average_rating
        .map(|r| format!("★{:.1}", r))
        .unwrap_or_else(|| "  -".to_string());
    let address = property.address.as_deref().or(property.city.as_deref()).unwrap_or("");

    format!(
        "{} | {} | {} | {}",
        price,
        sanitize_line(&property.title),
        sanitize_line(address),
        rating
    )
}

fn label(name: &str) -> Span<'_> {
    Span::styled(name, Style::default().fg(MUTED))
}

fn render_details(frame: &mut Frame, area: Rect, property: Option<&Property>) {
    let content = match property {
        Some(property) => Text::from(detail_lines(property)),
        None => Text::from("No listing selected"),
    };

    let paragraph =
        Paragraph::new(content).block(bordered(" Details ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(property: &Property) -> Vec<Line<'static>> {
    let optional = |value: Option<&str>| value.map(sanitize_line).unwrap_or_else(|| "-".into());

    let mut lines = vec![
        Line::from(Span::styled(
            sanitize_line(&property.title),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![label("Address: "), Span::raw(optional(property.address.as_deref()))]),
        Line::from(vec![label("City: "), Span::raw(optional(property.city.as_deref()))]),
        Line::from(vec![
            label("Type: "),
            Span::raw(
                property.property_type.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
            ),
        ]),
        Line::from(vec![
            label("Rating: "),
            Span::raw(
                property.average_rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".into()),
            ),
        ]),
        Line::from(vec![
            label("Listed: "),
            Span::raw(format_listed_at(property.created_at.as_ref())),
        ]),
        Line::from(""),
        Line::from(label("Sharing:")),
    ];

    if property.sharing_types.is_empty() {
        lines.push(Line::from("  none listed"));
    }
    for sharing in &property.sharing_types {
        lines.push(Line::from(format!(
            "  {:<7} {:>6}/month  {} available",
            sharing.kind.as_str(),
            sharing.price,
            sharing.available
        )));
    }

    lines.push(Line::from(""));
    let amenities: Vec<&str> = property.amenities.iter().map(String::as_str).collect();
    let amenities = if amenities.is_empty() { "-".to_string() } else { amenities.join(", ") };
    lines.push(Line::from(vec![label("Amenities: "), Span::raw(sanitize_line(&amenities))]));

    if property.has_virtual_tour() {
        lines.push(Line::from(vec![
            label("Tour: "),
            Span::raw(optional(property.virtual_tour_url.as_deref())),
        ]));
    }

    lines
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    explorer: &ListingExplorer,
    state: &RenderState,
) {
    let base = Style::default().fg(TEXT).bg(BAR);

    let (status_text, style) = if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", msg.text), base.fg(color))
    } else if let Some(error) = state.filter_error {
        (format!(" [ERROR] {} ", error), base.fg(ERROR))
    } else {
        (format!(" {} ", status_parts(explorer, state.selected_idx).join(" | ")), base)
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}

fn status_parts(explorer: &ListingExplorer, selected_idx: usize) -> Vec<String> {
    let filters = explorer.state();
    let mut parts =
        vec![format!("{}/{} listings", explorer.result_count(), explorer.store().len())];

    match explorer.active_filters_count() {
        0 => {}
        1 => parts.push("1 filter".to_string()),
        n => parts.push(format!("{} filters", n)),
    }

    parts.push(format!("sort: {}", filters.sort_by));

    let pending = if explorer.has_pending_price() { " …" } else { "" };
    parts.push(format!("price: {}{}", filters.price_range, pending));

    if explorer.result_count() > 0 {
        parts.push(format!("{}/{}", selected_idx + 1, explorer.result_count()));
    }

    parts.push("←/→ max  ⇧←/→ min  ^S sort  ^X clear  ^Y copy  ^C quit".to_string());
    parts
}
