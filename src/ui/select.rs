//! Single-value select control rendered as a native `<select>`.
//!
//! Callers describe the control declaratively with [`SelectNode`]s (items,
//! groups, labels, a placeholder, a trigger carrying extra classes). Every
//! render flattens that tree into native `<option>` entries.

use std::fmt::Write as _;

const BASE_CLASS: &str = "select select-bordered w-full";

/// A native `<option>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeOption {
    /// `None` renders an option without a `value` attribute.
    pub value: Option<String>,
    pub label: String,
    pub disabled: bool,
}

impl NativeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: label.into(),
            disabled: false,
        }
    }
}

/// Declarative child of a [`Select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectNode {
    /// Passed through unchanged.
    Option(NativeOption),
    Item { value: String, label: String },
    /// Placeholder shown while nothing is selected.
    Value { placeholder: Option<String> },
    Trigger {
        class_name: Option<String>,
        children: Vec<SelectNode>,
    },
    Content(Vec<SelectNode>),
    Group(Vec<SelectNode>),
    /// Group heading for the custom popup; a native select has no slot for it.
    Label(String),
    Separator,
    Fragment(Vec<SelectNode>),
    /// Bare text; not an element, contributes nothing.
    Text(String),
}

impl SelectNode {
    pub fn item(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectNode::Item {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        SelectNode::Value {
            placeholder: Some(text.into()),
        }
    }

    pub fn trigger(class_name: impl Into<String>, children: Vec<SelectNode>) -> Self {
        SelectNode::Trigger {
            class_name: Some(class_name.into()),
            children,
        }
    }
}

/// Flattens `children` into native options, depth first.
///
/// Only the first non-empty placeholder produces an option (disabled, empty
/// value). Labels, separators and text contribute nothing.
pub fn collect_options(children: &[SelectNode]) -> Vec<NativeOption> {
    let mut out = Vec::new();
    let mut placeholder_seen = false;
    walk(children, &mut out, &mut placeholder_seen);
    out
}

fn walk(nodes: &[SelectNode], out: &mut Vec<NativeOption>, placeholder_seen: &mut bool) {
    for node in nodes {
        match node {
            SelectNode::Option(opt) => out.push(opt.clone()),
            SelectNode::Item { value, label } => out.push(NativeOption::new(value, label)),
            SelectNode::Value { placeholder } => match placeholder.as_deref() {
                Some(text) if !text.is_empty() && !*placeholder_seen => {
                    *placeholder_seen = true;
                    out.push(NativeOption {
                        value: Some(String::new()),
                        label: text.to_string(),
                        disabled: true,
                    });
                }
                _ => {}
            },
            SelectNode::Trigger { children, .. }
            | SelectNode::Content(children)
            | SelectNode::Group(children)
            | SelectNode::Fragment(children) => walk(children, out, placeholder_seen),
            SelectNode::Label(_) | SelectNode::Separator | SelectNode::Text(_) => {}
        }
    }
}

/// Class name of the first top-level trigger, or empty.
pub fn trigger_class_name(children: &[SelectNode]) -> &str {
    children
        .iter()
        .find_map(|c| match c {
            SelectNode::Trigger { class_name, .. } => Some(class_name.as_deref().unwrap_or("")),
            _ => None,
        })
        .unwrap_or("")
}

type ChangeHandler = Box<dyn FnMut(&str) + Send>;

/// Select control state: controlled when `value` is set, otherwise backed by
/// an internal value seeded from `default_value`.
pub struct Select {
    value: Option<String>,
    internal_value: String,
    on_value_change: Option<ChangeHandler>,
    children: Vec<SelectNode>,
}

impl Select {
    pub fn new(children: Vec<SelectNode>) -> Self {
        Self {
            value: None,
            internal_value: String::new(),
            on_value_change: None,
            children,
        }
    }

    pub fn default_value(mut self, v: impl Into<String>) -> Self {
        self.internal_value = v.into();
        self
    }

    pub fn value(mut self, v: impl Into<String>) -> Self {
        self.value = Some(v.into());
        self
    }

    pub fn on_value_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }

    /// Owner-driven update of a controlled value.
    pub fn set_value(&mut self, v: Option<String>) {
        self.value = v;
    }

    pub fn current_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.internal_value)
    }

    /// Reacts to a user pick. The handler, when present, owns the change;
    /// otherwise the internal value is updated.
    pub fn change(&mut self, v: &str) {
        match self.on_value_change.as_mut() {
            Some(handler) => handler(v),
            None => self.internal_value = v.to_string(),
        }
    }

    pub fn options(&self) -> Vec<NativeOption> {
        collect_options(&self.children)
    }

    pub fn class_name(&self) -> String {
        join_classes(&[BASE_CLASS, trigger_class_name(&self.children)])
    }

    pub fn render(&self) -> String {
        let current = self.current_value();
        let mut html = String::new();
        let _ = write!(html, r#"<select class="{}">"#, escape(&self.class_name()));
        for opt in self.options() {
            html.push_str("<option");
            if let Some(v) = &opt.value {
                let _ = write!(html, r#" value="{}""#, escape(v));
                if v == current {
                    html.push_str(" selected");
                }
            }
            if opt.disabled {
                html.push_str(" disabled");
            }
            let _ = write!(html, ">{}</option>", escape(&opt.label));
        }
        html.push_str("</select>");
        html
    }
}

fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn role_picker() -> Vec<SelectNode> {
        vec![
            SelectNode::trigger(
                "mt-2",
                vec![SelectNode::placeholder("Choose a role")],
            ),
            SelectNode::Content(vec![
                SelectNode::Group(vec![
                    SelectNode::Label("People".into()),
                    SelectNode::item("donor", "Donor"),
                    SelectNode::item("volunteer", "Volunteer"),
                ]),
                SelectNode::Separator,
                SelectNode::Fragment(vec![SelectNode::item("org", "Organization")]),
                SelectNode::Text("stray".into()),
            ]),
        ]
    }

    #[test]
    fn flattens_nested_children_in_order() {
        let opts = collect_options(&role_picker());
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Choose a role", "Donor", "Volunteer", "Organization"]
        );
        assert_eq!(opts[0].value.as_deref(), Some(""));
        assert!(opts[0].disabled);
        assert_eq!(opts[1], NativeOption::new("donor", "Donor"));
    }

    #[test]
    fn labels_produce_no_option() {
        let opts = collect_options(&[SelectNode::Group(vec![
            SelectNode::Label("People".into()),
            SelectNode::item("donor", "Donor"),
        ])]);
        assert_eq!(opts, vec![NativeOption::new("donor", "Donor")]);
    }

    #[test]
    fn keeps_only_first_placeholder() {
        let opts = collect_options(&[
            SelectNode::Value { placeholder: None },
            SelectNode::placeholder(""),
            SelectNode::placeholder("First"),
            SelectNode::Group(vec![SelectNode::placeholder("Second")]),
        ]);
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].label, "First");
    }

    #[test]
    fn native_options_pass_through() {
        let native = NativeOption {
            value: Some("x".into()),
            label: "X".into(),
            disabled: true,
        };
        assert_eq!(collect_options(&[SelectNode::Option(native.clone())]), vec![native]);
    }

    #[test]
    fn trigger_class_comes_from_first_top_level_trigger() {
        let nodes = vec![
            SelectNode::Content(vec![SelectNode::trigger("nested", vec![])]),
            SelectNode::trigger("first", vec![]),
            SelectNode::trigger("second", vec![]),
        ];
        assert_eq!(trigger_class_name(&nodes), "first");
        assert_eq!(trigger_class_name(&[]), "");
    }

    #[test]
    fn uncontrolled_select_tracks_changes() {
        let mut select = Select::new(role_picker()).default_value("donor");
        assert_eq!(select.current_value(), "donor");
        select.change("org");
        assert_eq!(select.current_value(), "org");
    }

    #[test]
    fn controlled_select_defers_to_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut select = Select::new(role_picker())
            .value("volunteer")
            .on_value_change(move |v| sink.lock().unwrap().push(v.to_string()));

        select.change("donor");

        assert_eq!(select.current_value(), "volunteer");
        assert_eq!(*seen.lock().unwrap(), vec!["donor".to_string()]);

        select.set_value(Some("donor".into()));
        assert_eq!(select.current_value(), "donor");
    }

    #[test]
    fn renders_native_select() {
        let select = Select::new(role_picker()).value("donor");
        let html = select.render();
        assert!(html.starts_with(r#"<select class="select select-bordered w-full mt-2">"#));
        assert!(html.contains(r#"<option value="" disabled>Choose a role</option>"#));
        assert!(!html.contains("People"));
        assert!(html.contains(r#"<option value="donor" selected>Donor</option>"#));
        assert!(html.contains(r#"<option value="org">Organization</option>"#));
        assert!(html.ends_with("</select>"));
    }

    #[test]
    fn empty_value_selects_placeholder_and_escapes_text() {
        let select = Select::new(vec![
            SelectNode::placeholder("Pick <one>"),
            SelectNode::item("a&b", "\"A\" & B"),
        ]);
        let html = select.render();
        assert!(html.contains(r#"<option value="" selected disabled>Pick &lt;one&gt;</option>"#));
        assert!(html.contains(r#"<option value="a&amp;b">&quot;A&quot; &amp; B</option>"#));
    }
}
