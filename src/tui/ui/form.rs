//! Survey input form.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{AlcoholFrequency, RawInputs, Sex};
use crate::tui::styles::Theme;

const MAX_INPUT_LEN: usize = 8;

const YES_NO: &[&str] = &["No", "Yes"];
const SEXES: &[&str] = &["Male", "Female"];
const ALCOHOL_OPTIONS: [&str; 6] = {
    let mut labels = [""; 6];
    let mut i = 0;
    while i < labels.len() {
        labels[i] = AlcoholFrequency::FORM_ORDER[i].label();
        i += 1;
    }
    labels
};

/// Identifies a form field independently of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Age,
    Smoking,
    Alcohol,
    Sex,
    Waist,
    Hip,
    VigorousWork,
    ModerateWork,
    VigorousRecreation,
    ModerateRecreation,
    WalkCycle,
    FastingBloodSugar,
    TotalCholesterol,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits only
    Integer,
    /// Digits and one decimal point
    Decimal,
    /// Cycles through fixed options
    Choice(&'static [&'static str]),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: FieldKey,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    /// Text buffer for numeric fields
    pub value: String,
    /// Selected option for choice fields
    pub choice: usize,
}

impl FormField {
    fn numeric(
        key: FieldKey,
        label: &'static str,
        hint: &'static str,
        kind: FieldKind,
        value: String,
    ) -> Self {
        Self {
            key,
            label,
            hint,
            kind,
            value,
            choice: 0,
        }
    }

    fn choice(
        key: FieldKey,
        label: &'static str,
        options: &'static [&'static str],
        choice: usize,
    ) -> Self {
        Self {
            key,
            label,
            hint: "←/→ to change",
            kind: FieldKind::Choice(options),
            value: String::new(),
            choice,
        }
    }

    /// Text shown for the field's current value.
    #[must_use]
    pub fn display_value(&self) -> &str {
        match self.kind {
            FieldKind::Choice(options) => options.get(self.choice).copied().unwrap_or(""),
            _ => &self.value,
        }
    }
}

/// Survey form state
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_inputs(&RawInputs::default())
    }
}

impl FormState {
    /// Build a form pre-filled with `raw`.
    #[must_use]
    pub fn from_inputs(raw: &RawInputs) -> Self {
        use FieldKey as K;
        use FieldKind::{Decimal, Integer};

        let alcohol_choice = AlcoholFrequency::FORM_ORDER
            .iter()
            .position(|f| *f == raw.alcohol)
            .unwrap_or(0);
        let sex_choice = match raw.sex {
            Sex::Male => 0,
            Sex::Female => 1,
        };

        let fields = vec![
            FormField::numeric(
                K::Age,
                "Age",
                "years (18-100)",
                Integer,
                raw.age.to_string(),
            ),
            FormField::choice(
                K::Smoking,
                "Currently smoke?",
                YES_NO,
                usize::from(raw.smoking),
            ),
            FormField::choice(
                K::Alcohol,
                "Alcohol frequency",
                &ALCOHOL_OPTIONS,
                alcohol_choice,
            ),
            FormField::choice(K::Sex, "Sex", SEXES, sex_choice),
            FormField::numeric(
                K::Waist,
                "Waist",
                "cm (40-200)",
                Decimal,
                format_decimal(raw.waist_cm),
            ),
            FormField::numeric(
                K::Hip,
                "Hip",
                "cm (40-200)",
                Decimal,
                format_decimal(raw.hip_cm),
            ),
            FormField::numeric(
                K::VigorousWork,
                "Vigorous work",
                "min/week (0-2000)",
                Integer,
                raw.vigorous_work_min.to_string(),
            ),
            FormField::numeric(
                K::ModerateWork,
                "Moderate work",
                "min/week (0-2000)",
                Integer,
                raw.moderate_work_min.to_string(),
            ),
            FormField::numeric(
                K::VigorousRecreation,
                "Vigorous recreation",
                "min/week (0-2000)",
                Integer,
                raw.vigorous_recreation_min.to_string(),
            ),
            FormField::numeric(
                K::ModerateRecreation,
                "Moderate recreation",
                "min/week (0-2000)",
                Integer,
                raw.moderate_recreation_min.to_string(),
            ),
            FormField::numeric(
                K::WalkCycle,
                "Walking/cycling",
                "min/week (0-2000)",
                Integer,
                raw.walk_cycle_min.to_string(),
            ),
            FormField::numeric(
                K::FastingBloodSugar,
                "Fasting blood sugar",
                "mg/dl (50-300)",
                Integer,
                raw.fasting_blood_sugar.to_string(),
            ),
            FormField::numeric(
                K::TotalCholesterol,
                "Total cholesterol",
                "mg/dl (100-400)",
                Integer,
                raw.total_cholesterol.to_string(),
            ),
        ];

        Self {
            fields,
            selected_field: 0,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if field.value.len() >= MAX_INPUT_LEN {
            return;
        }
        let accepted = match field.kind {
            FieldKind::Integer => c.is_ascii_digit(),
            FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !field.value.contains('.')),
            FieldKind::Choice(_) => false,
        };
        if accepted {
            field.value.push(c);
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Step a choice field forward (`forward`) or backward, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = &mut self.fields[self.selected_field];
        if let FieldKind::Choice(options) = field.kind {
            let n = options.len();
            field.choice = if forward {
                (field.choice + 1) % n
            } else {
                (field.choice + n - 1) % n
            };
        }
    }

    /// Restore the current field to its default value
    pub fn reset_field(&mut self) {
        let index = self.selected_field;
        let defaults = Self::default();
        self.fields[index].value.zeroize();
        self.fields[index] = defaults.fields[index].clone();
    }

    /// Wipe all field buffers and restore the defaults.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.choice = 0;
        }
        *self = Self::default();
    }

    fn field(&self, key: FieldKey) -> &FormField {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .unwrap_or(&self.fields[0])
    }

    fn integer(&self, key: FieldKey) -> Result<u32, String> {
        let field = self.field(key);
        if field.value.is_empty() {
            return Err(format!("{}: Value required", field.label));
        }
        field
            .value
            .parse()
            .map_err(|_| format!("{}: Invalid number", field.label))
    }

    fn decimal(&self, key: FieldKey) -> Result<f64, String> {
        let field = self.field(key);
        if field.value.is_empty() {
            return Err(format!("{}: Value required", field.label));
        }
        field
            .value
            .parse()
            .map_err(|_| format!("{}: Invalid number", field.label))
    }

    fn choice_index(&self, key: FieldKey) -> usize {
        self.field(key).choice
    }

    /// Parse the buffers into raw inputs. Range checks are left to the estimator.
    pub fn to_raw_inputs(&self) -> Result<RawInputs, String> {
        use FieldKey as K;

        let alcohol = AlcoholFrequency::FORM_ORDER
            .get(self.choice_index(K::Alcohol))
            .copied()
            .unwrap_or(AlcoholFrequency::LessThanMonthly);
        let sex = if self.choice_index(K::Sex) == 1 {
            Sex::Female
        } else {
            Sex::Male
        };

        Ok(RawInputs {
            age: self.integer(K::Age)?,
            smoking: self.choice_index(K::Smoking) == 1,
            alcohol,
            sex,
            waist_cm: self.decimal(K::Waist)?,
            hip_cm: self.decimal(K::Hip)?,
            vigorous_work_min: self.integer(K::VigorousWork)?,
            moderate_work_min: self.integer(K::ModerateWork)?,
            vigorous_recreation_min: self.integer(K::VigorousRecreation)?,
            moderate_recreation_min: self.integer(K::ModerateRecreation)?,
            walk_cycle_min: self.integer(K::WalkCycle)?,
            fasting_blood_sugar: self.integer(K::FastingBloodSugar)?,
            total_cholesterol: self.integer(K::TotalCholesterol)?,
        })
    }
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Render the input form, one line per field.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let label_width = state
        .fields
        .iter()
        .map(|field| field.label.len())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == state.selected_field;
            let (marker, label_style) = if is_selected {
                ("▶ ", Theme::focused())
            } else {
                ("  ", Theme::text_secondary())
            };

            let value_style: Style = if is_selected {
                Theme::text().add_modifier(ratatui::style::Modifier::BOLD)
            } else {
                Theme::text()
            };

            let mut spans = vec![
                Span::styled(marker, Theme::focused()),
                Span::styled(format!("{:<label_width$}  ", field.label), label_style),
            ];
            match field.kind {
                FieldKind::Choice(_) => {
                    spans.push(Span::styled("◀ ", Theme::text_muted()));
                    spans.push(Span::styled(field.display_value().to_string(), value_style));
                    spans.push(Span::styled(" ▶", Theme::text_muted()));
                }
                _ => {
                    spans.push(Span::styled(field.value.clone(), value_style));
                    if is_selected {
                        spans.push(Span::styled("▌", Theme::cursor()));
                    }
                    spans.push(Span::styled(format!("  {}", field.hint), Theme::text_muted()));
                }
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Inputs ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    f.render_widget(Paragraph::new(lines).block(block), area);
}
