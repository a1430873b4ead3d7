//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Threshold, ThresholdSource};
use crate::tui::styles::Theme;

/// Render the title and model status lines.
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    fingerprint: &str,
    n_features: usize,
    threshold: Threshold,
) {
    let short_fp = fingerprint.get(..12).unwrap_or(fingerprint);
    let threshold_origin = match threshold.source {
        ThresholdSource::Artifact => "from artifact",
        ThresholdSource::Default => "default",
    };

    let text = vec![
        Line::from(vec![
            Span::styled(" ", Theme::text()),
            Span::styled("HTN Risk", Theme::title()),
            Span::styled(" │ ", Theme::text_muted()),
            Span::styled(
                "Hypertension Risk Prediction (Logistic Regression)",
                Theme::text_secondary(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" model ", Theme::text_muted()),
            Span::styled(short_fp.to_string(), Theme::text_secondary()),
            Span::styled(" │ features ", Theme::text_muted()),
            Span::styled(n_features.to_string(), Theme::text_secondary()),
            Span::styled(" │ threshold ", Theme::text_muted()),
            Span::styled(format!("{:.2}", threshold.value), Theme::text_secondary()),
            Span::styled(format!(" ({threshold_origin})"), Theme::text_muted()),
        ]),
    ];

    let header = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

/// Render key hints, or the current input error.
pub fn render_footer(f: &mut Frame, area: Rect, error: Option<&str>) {
    let content = match error {
        Some(err) => Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.to_string(), Theme::danger()),
        ]),
        None => Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Change ", Theme::key_desc()),
            Span::styled("[Del] ", Theme::key_hint()),
            Span::styled("Default ", Theme::key_desc()),
            Span::styled("[R] ", Theme::key_hint()),
            Span::styled("Reset ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
        Theme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
