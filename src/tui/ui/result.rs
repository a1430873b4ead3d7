//! Prediction and input summary view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskLabel};
use crate::tui::styles::Theme;

/// What the result panel shows
#[derive(Debug, Clone)]
pub enum ResultState {
    /// Estimate for the current inputs
    Ready(Assessment),
    /// Inputs could not be estimated
    Invalid { message: String },
}

/// Caption describing the computed waist-to-hip ratio.
#[must_use]
pub fn whr_caption(assessment: &Assessment) -> String {
    let level = if assessment.derived.whr_risk {
        "High"
    } else {
        "Normal"
    };
    format!(
        "Computed WHR = {:.2} → {level} risk per WHO cutoffs.",
        assessment.derived.whr
    )
}

/// Render the prediction, summary table and WHR caption.
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Ready(assessment) => render_assessment(f, area, assessment),
        ResultState::Invalid { message } => render_invalid(f, area, message),
    }
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Prediction
            Constraint::Min(0),    // Input summary
            Constraint::Length(3), // WHR caption
        ])
        .split(area);

    render_prediction(f, chunks[0], assessment);
    render_summary(f, chunks[1], assessment);

    let caption = Paragraph::new(Line::from(Span::styled(
        whr_caption(assessment),
        Theme::text_secondary(),
    )))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(caption, chunks[2]);
}

fn render_prediction(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let prediction = &assessment.prediction;
    let label_style = Theme::risk_label(prediction.label);

    let block = Block::default()
        .title(Span::styled(" Prediction ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3)])
        .split(inner);

    let icon = match prediction.label {
        RiskLabel::HighRisk => "!",
        RiskLabel::NormalRisk => "OK",
    };

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", prediction.label),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            prediction.label.description(),
            Theme::text_secondary(),
        )),
        Line::from(vec![
            Span::styled("probability: ", Theme::text_secondary()),
            Span::styled(format!("{:.2}", prediction.probability), Theme::text()),
            Span::styled("  (threshold: ", Theme::text_secondary()),
            Span::styled(format!("{:.2}", prediction.threshold_used), Theme::text()),
            Span::styled(")", Theme::text_secondary()),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(label_style)
        .ratio(prediction.probability.clamp(0.0, 1.0))
        .label(format!("{:.1}%", prediction.probability * 100.0));
    f.render_widget(gauge, chunks[1]);
}

fn render_summary(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let rows: Vec<Row> = assessment
        .features
        .iter()
        .map(|(name, value)| {
            Row::new(vec![
                Cell::from(Span::styled(name, Theme::text_secondary())),
                Cell::from(Span::styled(value.to_string(), Theme::text())),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(8)])
        .header(Row::new(vec!["Feature", "value"]).style(Theme::title()))
        .block(
            Block::default()
                .title(Span::styled(" Input Summary ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    f.render_widget(table, area);
}

fn render_invalid(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Cannot estimate", Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, area);
}
