//! Form Controls
//!
//! Live value and checkedness of `input`, `select` and `textarea`, kept
//! apart from their default (attribute) state so that a form reset can
//! restore the defaults.

use crate::{DomResult, DomTree, ElementData, ElementMatcher, NodeId, Selector};

/// Kind of form control element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Input,
    Select,
    Textarea,
}

impl ControlKind {
    /// Classify an element, `None` if it is not a form control
    pub fn of(element: &ElementData) -> Option<Self> {
        match element.tag.as_str() {
            "input" => Some(Self::Input),
            "select" => Some(Self::Select),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }
}

impl DomTree {
    /// Control `type`: lowercased `type` attribute for inputs (default
    /// `text`), `select-one` / `textarea` for the other controls
    pub fn control_type(&self, id: NodeId) -> String {
        let Some(elem) = self.element(id) else {
            return String::new();
        };
        match ControlKind::of(elem) {
            Some(ControlKind::Input) => elem
                .get_attr("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
            Some(ControlKind::Select) => "select-one".to_string(),
            Some(ControlKind::Textarea) => "textarea".to_string(),
            None => String::new(),
        }
    }

    /// Whether the control is a checkbox or radio button
    pub fn is_checkable(&self, id: NodeId) -> bool {
        matches!(self.control_type(id).as_str(), "checkbox" | "radio")
    }

    /// Current value of a form control
    pub fn control_value(&self, id: NodeId) -> String {
        let Some(elem) = self.element(id) else {
            return String::new();
        };
        if let Some(value) = &elem.dirty_value {
            return value.clone();
        }
        match ControlKind::of(elem) {
            Some(ControlKind::Input) => elem.get_attr("value").unwrap_or_default().to_string(),
            Some(ControlKind::Textarea) => self.text_content(id),
            Some(ControlKind::Select) => self.default_option_value(id),
            None => String::new(),
        }
    }

    fn default_option_value(&self, select: NodeId) -> String {
        let options: Vec<NodeId> = self
            .descendants(select)
            .filter(|&d| self.tag_name(d) == Some("option"))
            .collect();
        let chosen = options
            .iter()
            .copied()
            .find(|&o| self.element(o).is_some_and(|e| e.has_attr("selected")))
            .or_else(|| options.first().copied());

        chosen
            .map(|option| match self.element(option).and_then(|e| e.get_attr("value")) {
                Some(value) => value.to_string(),
                None => self.text_content(option).trim().to_string(),
            })
            .unwrap_or_default()
    }

    /// Set the live value (what a user typing would do)
    pub fn set_control_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.expect_element_mut(id)?.dirty_value = Some(value.to_string());
        Ok(())
    }

    /// Current checkedness of a checkbox/radio
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.dirty_checked.unwrap_or_else(|| e.has_attr("checked")))
    }

    /// Set checkedness. Checking a radio unchecks the rest of its group
    /// within the same form.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<()> {
        self.expect_element_mut(id)?.dirty_checked = Some(checked);

        if checked && self.control_type(id) == "radio" {
            for other in self.radio_group(id) {
                if other != id {
                    self.expect_element_mut(other)?.dirty_checked = Some(false);
                }
            }
        }
        Ok(())
    }

    fn radio_group(&self, radio: NodeId) -> Vec<NodeId> {
        let Some(name) = self.element(radio).and_then(|e| e.get_attr("name")) else {
            return Vec::new();
        };
        let scope = self
            .ancestors(radio)
            .find(|&a| self.tag_name(a) == Some("form"))
            .unwrap_or(self.root());
        let group = Selector::tag("input").with_attr_eq("type", "radio").with_attr_eq("name", name);
        self.descendants(scope)
            .filter(|&d| self.element(d).is_some_and(|e| group.matches(e)))
            .collect()
    }

    /// Reset every control below `form` to its default state
    pub fn reset_controls(&mut self, form: NodeId) -> DomResult<()> {
        let controls: Vec<NodeId> = self
            .descendants(form)
            .filter(|&d| self.element(d).is_some_and(|e| ControlKind::of(e).is_some()))
            .collect();
        tracing::debug!("Resetting {} form controls under {}", controls.len(), form);
        for control in controls {
            let elem = self.expect_element_mut(control)?;
            elem.dirty_value = None;
            elem.dirty_checked = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(controls: &[(&str, &[(&str, &str)])]) -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        tree.append_child(tree.root(), form).unwrap();
        let ids = controls
            .iter()
            .map(|(tag, attrs)| {
                let id = tree.create_element_with_attrs(tag, attrs);
                tree.append_child(form, id).unwrap();
                id
            })
            .collect();
        (tree, form, ids)
    }

    #[test]
    fn test_input_value_and_type() {
        let (mut tree, _, ids) = form_with(&[("input", &[("value", "default")])]);
        let input = ids[0];
        assert_eq!(tree.control_type(input), "text");
        assert_eq!(tree.control_value(input), "default");

        tree.set_control_value(input, "typed").unwrap();
        assert_eq!(tree.control_value(input), "typed");
    }

    #[test]
    fn test_type_is_lowercased() {
        let (tree, _, ids) = form_with(&[("input", &[("type", "EMAIL")])]);
        assert_eq!(tree.control_type(ids[0]), "email");
    }

    #[test]
    fn test_textarea_value() {
        let (mut tree, _, ids) = form_with(&[("textarea", &[])]);
        let text = tree.create_text("mensagem");
        tree.append_child(ids[0], text).unwrap();
        assert_eq!(tree.control_value(ids[0]), "mensagem");
    }

    #[test]
    fn test_select_value() {
        let (mut tree, _, ids) = form_with(&[("select", &[])]);
        let select = ids[0];
        let first = tree.create_element_with_attrs("option", &[("value", "")]);
        let second = tree.create_element_with_attrs("option", &[("value", "sp"), ("selected", "")]);
        tree.append_child(select, first).unwrap();
        tree.append_child(select, second).unwrap();
        assert_eq!(tree.control_value(select), "sp");

        tree.element_mut(second).unwrap().remove_attr("selected");
        assert_eq!(tree.control_value(select), "");
    }

    #[test]
    fn test_checkbox_state() {
        let (mut tree, _, ids) = form_with(&[("input", &[("type", "checkbox")])]);
        let checkbox = ids[0];
        assert!(tree.is_checkable(checkbox));
        assert!(!tree.is_checked(checkbox));
        tree.set_checked(checkbox, true).unwrap();
        assert!(tree.is_checked(checkbox));
    }

    #[test]
    fn test_radio_group_exclusive() {
        let (mut tree, _, ids) = form_with(&[
            ("input", &[("type", "radio"), ("name", "plano"), ("checked", "")]),
            ("input", &[("type", "radio"), ("name", "plano")]),
        ]);
        assert!(tree.is_checked(ids[0]));
        tree.set_checked(ids[1], true).unwrap();
        assert!(!tree.is_checked(ids[0]));
        assert!(tree.is_checked(ids[1]));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut tree, form, ids) = form_with(&[
            ("input", &[("value", "")]),
            ("input", &[("type", "checkbox"), ("checked", "")]),
        ]);
        tree.set_control_value(ids[0], "Maria").unwrap();
        tree.set_checked(ids[1], false).unwrap();

        tree.reset_controls(form).unwrap();
        assert_eq!(tree.control_value(ids[0]), "");
        assert!(tree.is_checked(ids[1]));
    }
}
