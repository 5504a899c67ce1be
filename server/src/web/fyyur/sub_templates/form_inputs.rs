use crate::web::fyyur::form_values::{BoolFormValue, FormValue, FormValueRepresentation};
use crate::web::fyyur::validation::{UsState, US_STATES};
use askama::filters::Safe;
use askama::Template;

#[derive(Debug, PartialEq)]
pub enum InputType {
    Text,
    Url,
    Tel,
    Integer,
    Textarea,
}

impl InputType {
    fn as_html_type_attr(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Tel => "tel",
            InputType::Integer => "number",
            InputType::Textarea => panic!("Textarea inputs should be handled separately."),
        }
    }

    fn is_textarea(&self) -> bool {
        *self == InputType::Textarea
    }
}

pub struct InputConfiguration<'a> {
    input_type: InputType,
    placeholder: Option<&'a str>,
    info: Option<&'a str>,
}

impl Default for InputConfiguration<'_> {
    fn default() -> Self {
        Self {
            input_type: InputType::Text,
            placeholder: None,
            info: None,
        }
    }
}

impl<'a> InputConfiguration<'a> {
    pub fn builder() -> InputConfigurationBuilder<'a> {
        InputConfigurationBuilder::default()
    }
}

#[derive(Default)]
pub struct InputConfigurationBuilder<'a> {
    value: InputConfiguration<'a>,
}

impl<'a> InputConfigurationBuilder<'a> {
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.value.input_type = input_type;
        self
    }
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.value.placeholder = Some(placeholder);
        self
    }
    pub fn info(mut self, info: &'a str) -> Self {
        self.value.info = Some(info);
        self
    }
    pub fn build(self) -> InputConfiguration<'a> {
        self.value
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    label: &'a str,
    config: InputConfiguration<'a>,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> FormFieldTemplate<'a, T> {
    pub fn new(
        data: &'a FormValue<T>,
        name: &'a str,
        label: &'a str,
        config: InputConfiguration<'a>,
    ) -> Self {
        Self {
            name,
            label,
            config,
            data,
        }
    }
}

pub struct SelectEntry {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/select.html")]
pub struct SelectTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    entries: Vec<SelectEntry>,
    label: &'a str,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> SelectTemplate<'a, T> {
    /// Create a select input with the given `(value, text)` options. The option matching the
    /// form value's current string value is preselected.
    pub fn new<'o>(
        data: &'a FormValue<T>,
        name: &'a str,
        options: impl IntoIterator<Item = (&'o str, &'o str)>,
        label: &'a str,
    ) -> Self {
        let entries = options
            .into_iter()
            .map(|(value, text)| SelectEntry {
                selected: value == data.string_value(),
                value: value.to_owned(),
                text: text.to_owned(),
            })
            .collect();
        Self {
            name,
            entries,
            label,
            data,
        }
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/checkbox.html")]
pub struct CheckboxTemplate<'a> {
    name: &'a str,
    label: &'a str,
    data: &'a BoolFormValue,
}

impl<'a> CheckboxTemplate<'a> {
    pub fn new(data: &'a BoolFormValue, name: &'a str, label: &'a str) -> Self {
        Self { name, label, data }
    }
}

/// Shortcuts for rendering form inputs from within page templates.
impl<T: FormValueRepresentation> FormValue<T> {
    pub fn text_input(&self, name: &str, label: &str) -> Result<Safe<String>, askama::Error> {
        let template = FormFieldTemplate::new(self, name, label, InputConfiguration::default());
        Ok(Safe(template.render()?))
    }

    pub fn typed_input(
        &self,
        name: &str,
        label: &str,
        input_type: &str,
        placeholder: &str,
    ) -> Result<Safe<String>, askama::Error> {
        let input_type = match input_type {
            "url" => InputType::Url,
            "tel" => InputType::Tel,
            "number" => InputType::Integer,
            "textarea" => InputType::Textarea,
            _ => InputType::Text,
        };
        let config = InputConfiguration::builder()
            .input_type(input_type)
            .placeholder(placeholder)
            .build();
        let template = FormFieldTemplate::new(self, name, label, config);
        Ok(Safe(template.render()?))
    }

    pub fn text_input_with_info(
        &self,
        name: &str,
        label: &str,
        info: &str,
    ) -> Result<Safe<String>, askama::Error> {
        let config = InputConfiguration::builder().info(info).build();
        let template = FormFieldTemplate::new(self, name, label, config);
        Ok(Safe(template.render()?))
    }
}

impl FormValue<UsState> {
    pub fn state_select(&self, name: &str, label: &str) -> Result<Safe<String>, askama::Error> {
        let template = SelectTemplate::new(
            self,
            name,
            US_STATES.iter().map(|state| (*state, *state)),
            label,
        );
        Ok(Safe(template.render()?))
    }
}

impl BoolFormValue {
    pub fn checkbox(&self, name: &str, label: &str) -> Result<Safe<String>, askama::Error> {
        Ok(Safe(CheckboxTemplate::new(self, name, label).render()?))
    }
}
