//! Configuration persistence and form definitions
//!
//! User defaults live in `~/.config/inline-edit/config.yaml`; forms are
//! described by standalone YAML files and built into a [`FormModel`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::{
    CurrencyAdapter, DateAdapter, EditableField, FieldAdapter, FieldWidget, NumberAdapter,
    PercentAdapter, SelectAdapter, SelectOption, TextAdapter, TextareaAdapter, TitleAdapter,
};
use crate::model::{DateValue, FieldId, FormModel, NumberValue};
use crate::util::DEFAULT_DATE_FORMAT;
use crate::validation::{NumberSchema, StringSchema, Validator};
use crate::view::InputKind;

// ============================================================================
// User defaults
// ============================================================================

/// Defaults that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineEditConfig {
    /// Symbol of currency fields that don't set their own
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono pattern of date fields that don't set their own
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_true")]
    pub show_saving_state: bool,
    /// Opening one field closes the others
    #[serde(default)]
    pub exclusive_editing: bool,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for InlineEditConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            show_saving_state: true,
            exclusive_editing: false,
        }
    }
}

impl InlineEditConfig {
    /// Read `config.yaml` from the user config directory. Never fails: a
    /// missing or broken file yields the built-in defaults.
    pub fn load() -> Self {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory, using built-in defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no user config, using built-in defaults");
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| format!("unreadable: {}", e))
            .and_then(|text| serde_yaml::from_str(&text).map_err(|e| format!("invalid: {}", e)));
        match parsed {
            Ok(config) => {
                tracing::info!(path = %path.display(), "user config loaded");
                config
            }
            Err(reason) => {
                tracing::warn!(path = %path.display(), "user config {}, using defaults", reason);
                Self::default()
            }
        }
    }

    /// Write to the user config directory, creating it when needed
    pub fn save(&self) -> Result<(), String> {
        crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())
            .and_then(|path| self.save_to(&path))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let yaml = serde_yaml::to_string(self).map_err(|e| format!("Cannot encode config: {}", e))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Cannot create {}: {}", dir.display(), e))?;
        }
        std::fs::write(path, yaml).map_err(|e| format!("Cannot write {}: {}", path.display(), e))?;
        tracing::info!(path = %path.display(), "user config saved");
        Ok(())
    }
}

// ============================================================================
// Form definitions
// ============================================================================

/// A form file: an ordered list of fields
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Overrides the user default
    #[serde(default)]
    pub exclusive_editing: Option<bool>,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKindConfig,
    /// Committed value; its YAML type must fit the field kind
    #[serde(default)]
    pub value: Option<serde_yaml::Value>,
    #[serde(default)]
    pub readonly: bool,
    /// Editing flag owned by the host, reflected back after each request
    #[serde(default)]
    pub controlled: bool,
    #[serde(default)]
    pub show_saving_state: Option<bool>,
    /// Fixed display text for rest/interest
    #[serde(default)]
    pub display_value: Option<String>,
    #[serde(default)]
    pub validate: Option<ValidationConfig>,
}

/// Per-kind options, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKindConfig {
    Text {
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        max_length: Option<usize>,
        #[serde(default)]
        input_type: Option<String>,
    },
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        decimal_places: Option<usize>,
        #[serde(default)]
        use_grouping: Option<bool>,
        #[serde(default)]
        placeholder: Option<String>,
    },
    Currency {
        #[serde(default)]
        symbol: Option<String>,
        #[serde(default)]
        decimal_places: Option<usize>,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        placeholder: Option<String>,
    },
    Percent {
        #[serde(default)]
        decimal_places: Option<usize>,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        placeholder: Option<String>,
    },
    Date {
        #[serde(default)]
        display_format: Option<String>,
        #[serde(default)]
        placeholder: Option<String>,
    },
    Select {
        options: Vec<SelectOption>,
        #[serde(default)]
        placeholder: Option<String>,
    },
    Title {
        #[serde(default)]
        placeholder: Option<String>,
    },
    Textarea {
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        max_length: Option<usize>,
    },
}

/// Declarative validation rules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    /// Message shown when the value is empty
    #[serde(default)]
    pub required: Option<String>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub email: bool,
}

impl ValidationConfig {
    fn text(&self) -> Validator<String> {
        let mut schema = StringSchema::new();
        if let Some(message) = &self.required {
            schema = schema.non_empty(message);
        }
        if let Some(min) = self.min_length {
            schema = schema.min_length(min, None);
        }
        if let Some(max) = self.max_length {
            schema = schema.max_length(max, None);
        }
        if self.email {
            schema = schema.email(None);
        }
        Validator::schema(schema)
    }

    fn number(&self) -> Validator<NumberValue> {
        match &self.required {
            Some(message) => Validator::schema(NumberSchema::new().required(message)),
            None => Validator::None,
        }
    }

    fn date(&self) -> Validator<DateValue> {
        match self.required.clone() {
            Some(message) => Validator::check(move |value: &DateValue| {
                value.is_none().then(|| message.clone())
            }),
            None => Validator::None,
        }
    }
}

impl FormConfig {
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Invalid form definition: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read form {}: {}", path.display(), e))?;
        let form = Self::from_yaml(&content)?;
        tracing::info!("Loaded form with {} fields from {}", form.fields.len(), path.display());
        Ok(form)
    }

    /// Build the form, filling unset options from the user defaults
    pub fn build(&self, defaults: &InlineEditConfig) -> Result<FormModel, String> {
        let exclusive = self.exclusive_editing.unwrap_or(defaults.exclusive_editing);
        let mut form = FormModel::new().with_exclusive_editing(exclusive);
        for field in &self.fields {
            let widget = field
                .build(defaults)
                .map_err(|e| format!("Field '{}': {}", field.id, e))?;
            form.push_boxed(FieldId::new(field.id.clone()), widget)?;
        }
        Ok(form)
    }
}

impl FieldConfig {
    fn build(&self, defaults: &InlineEditConfig) -> Result<Box<dyn FieldWidget>, String> {
        let rules = self.validate.clone().unwrap_or_default();
        let show_saving_state = self
            .show_saving_state
            .or((!defaults.show_saving_state).then_some(false));

        let widget = match &self.kind {
            FieldKindConfig::Text {
                placeholder,
                max_length,
                input_type,
            } => {
                let mut adapter = TextAdapter::new().input_kind(parse_input_kind(input_type.as_deref())?);
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                if let Some(max) = max_length {
                    adapter = adapter.max_length(*max);
                }
                self.finish(adapter, text_value(&self.value)?, rules.text(), show_saving_state)
            }
            FieldKindConfig::Number {
                min,
                max,
                decimal_places,
                use_grouping,
                placeholder,
            } => {
                let mut adapter = NumberAdapter::new();
                if let Some(min) = min {
                    adapter = adapter.min(*min);
                }
                if let Some(max) = max {
                    adapter = adapter.max(*max);
                }
                if let Some(places) = decimal_places {
                    adapter = adapter.decimal_places(*places);
                }
                if let Some(grouping) = use_grouping {
                    adapter = adapter.use_grouping(*grouping);
                }
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                self.finish(adapter, number_value(&self.value)?, rules.number(), show_saving_state)
            }
            FieldKindConfig::Currency {
                symbol,
                decimal_places,
                min,
                max,
                placeholder,
            } => {
                let mut adapter = CurrencyAdapter::new().symbol(
                    symbol
                        .clone()
                        .unwrap_or_else(|| defaults.currency_symbol.clone()),
                );
                if let Some(places) = decimal_places {
                    adapter = adapter.decimal_places(*places);
                }
                if let Some(min) = min {
                    adapter = adapter.min(*min);
                }
                if let Some(max) = max {
                    adapter = adapter.max(*max);
                }
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                self.finish(adapter, number_value(&self.value)?, rules.number(), show_saving_state)
            }
            FieldKindConfig::Percent {
                decimal_places,
                min,
                max,
                placeholder,
            } => {
                let mut adapter = PercentAdapter::new();
                if let Some(places) = decimal_places {
                    adapter = adapter.decimal_places(*places);
                }
                if let Some(min) = min {
                    adapter = adapter.min(*min);
                }
                if let Some(max) = max {
                    adapter = adapter.max(*max);
                }
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                self.finish(adapter, number_value(&self.value)?, rules.number(), show_saving_state)
            }
            FieldKindConfig::Date {
                display_format,
                placeholder,
            } => {
                let mut adapter = DateAdapter::new().display_format(
                    display_format
                        .clone()
                        .unwrap_or_else(|| defaults.date_format.clone()),
                );
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                self.finish(adapter, date_value(&self.value)?, rules.date(), show_saving_state)
            }
            FieldKindConfig::Select {
                options,
                placeholder,
            } => {
                if options.is_empty() {
                    return Err("select fields need at least one option".to_string());
                }
                let mut adapter = SelectAdapter::new(options.clone());
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                if let Some(show) = show_saving_state {
                    adapter = adapter.show_saving_state(show);
                }
                self.finish(adapter, text_value(&self.value)?, rules.text(), None)
            }
            FieldKindConfig::Title { placeholder } => {
                let mut adapter = TitleAdapter::new();
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                self.finish(adapter, text_value(&self.value)?, rules.text(), show_saving_state)
            }
            FieldKindConfig::Textarea {
                placeholder,
                max_length,
            } => {
                let mut adapter = TextareaAdapter::new();
                if let Some(placeholder) = placeholder {
                    adapter = adapter.placeholder(placeholder.clone());
                }
                if let Some(max) = max_length {
                    adapter = adapter.max_length(*max);
                }
                self.finish(adapter, text_value(&self.value)?, rules.text(), show_saving_state)
            }
        };
        Ok(widget)
    }

    fn finish<A: FieldAdapter>(
        &self,
        adapter: A,
        value: A::Value,
        validator: Validator<A::Value>,
        show_saving_state: Option<bool>,
    ) -> Box<dyn FieldWidget> {
        let mut field = if self.controlled {
            EditableField::controlled(self.label.clone(), value, false, adapter)
        } else {
            EditableField::new(self.label.clone(), value, adapter)
        };
        if !validator.is_none() {
            field = field.with_validator(validator);
        }
        field = field.with_readonly(self.readonly);
        if let Some(show) = show_saving_state {
            field = field.with_show_saving_state(show);
        }
        if let Some(display) = &self.display_value {
            field = field.with_display_value(display.clone());
        }
        Box::new(field)
    }
}

fn parse_input_kind(name: Option<&str>) -> Result<InputKind, String> {
    match name.unwrap_or("text") {
        "text" => Ok(InputKind::Text),
        "email" => Ok(InputKind::Email),
        "url" => Ok(InputKind::Url),
        "tel" => Ok(InputKind::Tel),
        other => Err(format!("unknown input_type '{}'", other)),
    }
}

fn text_value(value: &Option<serde_yaml::Value>) -> Result<String, String> {
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(String::new()),
        Some(serde_yaml::Value::String(s)) => Ok(s.clone()),
        Some(serde_yaml::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(format!("expected a text value, got {:?}", other)),
    }
}

fn number_value(value: &Option<serde_yaml::Value>) -> Result<NumberValue, String> {
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("number out of range: {}", n)),
        Some(other) => Err(format!("expected a number, got {:?}", other)),
    }
}

fn date_value(value: &Option<serde_yaml::Value>) -> Result<DateValue, String> {
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) if s.is_empty() => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("expected a date string, got {:?}", other)),
    }
}
