//! Main TUI application.
//!
//! Handles:
//! - Artifact loading at startup
//! - Input event handling
//! - Re-estimation after every edit

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{load_artifacts, LogisticRegression};
use crate::application::RiskEstimator;
use crate::config::AppConfig;
use crate::ports::Classifier;

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer, render_footer, render_header,
    result::{render_result, ResultState},
};

/// Main application state
pub struct App {
    estimator: RiskEstimator<LogisticRegression>,

    /// Whether the app should quit
    should_quit: bool,

    form: FormState,

    /// Estimate for the current form contents
    result: ResultState,
}

impl App {
    /// Load the model directory named in `config` and build the application.
    ///
    /// # Errors
    /// Returns error if the classifier or feature manifest cannot be loaded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let artifacts = load_artifacts(&config.model_dir).with_context(|| {
            format!(
                "Failed to load model artifacts from {:?}. Set {} to a directory containing log_reg_model.json and feature_order.json.",
                config.model_dir,
                crate::config::MODEL_PATH_ENV
            )
        })?;

        Ok(Self::with_estimator(RiskEstimator::new(artifacts)))
    }

    /// Create the application around an already loaded estimator.
    #[must_use]
    pub fn with_estimator(estimator: RiskEstimator<LogisticRegression>) -> Self {
        let mut app = Self {
            estimator,
            should_quit: false,
            form: FormState::default(),
            result: ResultState::Invalid {
                message: String::new(),
            },
        };
        app.recompute();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        self.form.clear_sensitive();
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let artifacts = self.estimator.artifacts();
        let fingerprint = artifacts.classifier.fingerprint().to_string();
        let n_features = artifacts.classifier.n_features();
        let threshold = artifacts.threshold;

        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Header
                        Constraint::Min(0),    // Form + result
                        Constraint::Length(2), // Footer
                        Constraint::Length(2), // Disclaimer
                    ])
                    .split(area);

                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(48), Constraint::Percentage(52)])
                    .split(chunks[1]);

                render_header(f, chunks[0], &fingerprint, n_features, threshold);
                render_form(f, body[0], &self.form);
                render_result(f, body[1], &self.result);
                render_footer(f, chunks[2], self.error_message());
                render_disclaimer(f, chunks[3]);
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn error_message(&self) -> Option<&str> {
        match &self.result {
            ResultState::Invalid { message } => Some(message.as_str()),
            ResultState::Ready(_) => None,
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => self.form.next_field(),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') => self.form.cycle_choice(true),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form.clear_sensitive();
            }
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.reset_field(),
            _ => return,
        }

        self.recompute();
    }

    /// Re-run the estimate for the current form contents.
    fn recompute(&mut self) {
        self.result = match self.form.to_raw_inputs() {
            Ok(raw) => match self.estimator.assess(&raw) {
                Ok(assessment) => ResultState::Ready(assessment),
                Err(e) => ResultState::Invalid {
                    message: e.to_string(),
                },
            },
            Err(message) => ResultState::Invalid { message },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logistic::ExportedLogisticModel;
    use crate::application::ModelArtifacts;
    use crate::domain::{FeatureOrder, RiskLabel, Threshold, FEATURE_NAMES};
    use crate::tui::ui::result::whr_caption;

    fn test_app() -> App {
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        let model = LogisticRegression::from_exported(ExportedLogisticModel {
            feature_names: Some(names.clone()),
            coefficients: vec![0.05, 0.3, 0.6, 0.4, -0.0002, 0.01, 0.005],
            intercept: -5.0,
            scaler: None,
            description: None,
        })
        .expect("model");
        let artifacts = ModelArtifacts::new(
            model,
            FeatureOrder::new(names).expect("order"),
            Threshold::default(),
        )
        .expect("artifacts");
        App::with_estimator(RiskEstimator::new(artifacts))
    }

    fn ready(app: &App) -> &crate::domain::Assessment {
        match &app.result {
            ResultState::Ready(a) => a,
            ResultState::Invalid { message } => panic!("expected estimate, got {message}"),
        }
    }

    fn type_into(app: &mut App, field_index: usize, text: &str) {
        app.form.selected_field = field_index;
        for _ in 0..app.form.fields[field_index].value.len() {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_initial_estimate_uses_defaults() {
        let app = test_app();
        let assessment = ready(&app);

        assert_eq!(
            assessment.vector.values(),
            &[40.0, 0.0, 0.0, 0.0, 0.0, 90.0, 180.0]
        );
        assert_eq!(assessment.prediction.label, RiskLabel::NormalRisk);
        assert_eq!(
            whr_caption(assessment),
            "Computed WHR = 0.89 → Normal risk per WHO cutoffs."
        );
        assert!(app.error_message().is_none());
    }

    #[test]
    fn test_edit_triggers_recompute() {
        let mut app = test_app();
        let before = ready(&app).prediction.probability;

        // Waist is the fifth field.
        type_into(&mut app, 4, "110");
        let assessment = ready(&app);
        assert!(assessment.derived.whr_risk);
        assert!(assessment.prediction.probability > before);
    }

    #[test]
    fn test_out_of_range_value_surfaces_error() {
        let mut app = test_app();
        type_into(&mut app, 0, "12");

        let message = app.error_message().expect("error shown");
        assert!(message.contains("Age 12"));

        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert!(app.error_message().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = test_app();
        type_into(&mut app, 0, "77");
        app.handle_key(KeyCode::Char('r'), KeyModifiers::NONE);

        assert_eq!(ready(&app).inputs, crate::domain::RawInputs::default());
    }
}
