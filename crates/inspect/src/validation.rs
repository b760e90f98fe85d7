use crate::visualize::Weight;
use html::ElementRef;

/// Caller-computed extras for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomValidations {
    /// Appended to the element's log line as-is.
    pub payload: Option<serde_json::Value>,
    /// Element-specific problems; any of them escalates the line to a warning.
    pub warnings: Vec<String>,
}

impl CustomValidations {
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// One element plus the caller's verdict on it.
#[derive(Debug, Clone)]
pub struct WeightedElement<'a> {
    pub weight: Weight,
    pub element: ElementRef<'a>,
    pub is_valid: bool,
    pub custom_validations: CustomValidations,
}

impl<'a> WeightedElement<'a> {
    pub fn new(weight: Weight, element: ElementRef<'a>) -> Self {
        Self {
            weight,
            element,
            is_valid: true,
            custom_validations: CustomValidations::default(),
        }
    }

    pub fn invalid(mut self) -> Self {
        self.is_valid = false;
        self
    }

    pub fn with_custom_validations(mut self, custom: CustomValidations) -> Self {
        self.custom_validations = custom;
        self
    }
}

/// Like [`WeightedElement`], but the element is described by a compound selector and its
/// inner markup instead of a live node.
#[derive(Debug, Clone)]
pub struct SelectorEntry<'a> {
    pub weight: Weight,
    pub selector: &'a str,
    pub inner_html: &'a str,
    pub is_valid: bool,
    pub custom_validations: CustomValidations,
}

/// A head-level problem not tied to one element's line.
#[derive(Debug, Clone)]
pub struct ValidationWarning<'a> {
    pub warning: String,
    /// Shown through the matcher, so static counterparts appear when available.
    pub elements: Vec<ElementRef<'a>>,
    /// Shown as given.
    pub element: Option<ElementRef<'a>>,
}

impl<'a> ValidationWarning<'a> {
    pub fn new(warning: impl Into<String>) -> Self {
        Self {
            warning: warning.into(),
            elements: Vec::new(),
            element: None,
        }
    }

    pub fn with_elements(mut self, elements: Vec<ElementRef<'a>>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_element(mut self, element: ElementRef<'a>) -> Self {
        self.element = Some(element);
        self
    }
}
