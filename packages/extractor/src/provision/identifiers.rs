//! Identifier and label assignment.
//!
//! Runs once over a built document, zone by zone (preamble, sections,
//! schedules), and fills `global_id`, `parent_id`, `heading_path_str`,
//! `label_str`, `context_str`. It also prefixes the text with the bold
//! marginal note.
//!
//! Key formats, for a document key `doc`:
//!
//! ```text
//! preamble             doc_preamble                  "Preamble"
//! preamble provision   doc_preamble_provision_0      "Preamble provision 0"
//! section              doc_section_5                 "Section 5"
//! subsection           doc_subsection_5(1)           "Subsection 5(1)"
//! nested subsection    doc_subsection_5(1)(a)        "Subsection 5(1)(a)"
//! schedule             doc_schedule_SCHEDULE I       "SCHEDULE I"
//! ```

use std::collections::HashSet;

use crate::config::HEADING_SEPARATOR;
use crate::types::Provision;

/// Assigns document-unique identifiers and display labels.
#[derive(Debug)]
pub struct IdAssigner<'a> {
    doc_id: &'a str,
    title: Option<&'a str>,
    used: HashSet<String>,
}

impl<'a> IdAssigner<'a> {
    /// Create an assigner for the document keyed `doc_id`.
    #[must_use]
    pub fn new(doc_id: &'a str, title: Option<&'a str>) -> Self {
        Self {
            doc_id,
            title,
            used: HashSet::new(),
        }
    }

    /// Assign the preamble and its provisions.
    pub fn assign_preamble(&mut self, preamble: &mut Provision) {
        let global_id = self.unique(format!("{}_preamble", self.doc_id));
        self.finish(preamble, global_id.clone(), None, "Preamble".to_string(), false);

        for (ordinal, child) in preamble.children.iter_mut().enumerate() {
            let key = child
                .local_id
                .clone()
                .unwrap_or_else(|| ordinal.to_string());
            let id = self.unique(format!("{}_preamble_provision_{key}", self.doc_id));
            let label = format!("Preamble provision {key}");
            self.finish(child, id, Some(global_id.clone()), label, true);
        }
    }

    /// Assign the top-level sections and, recursively, their subsections.
    pub fn assign_sections(&mut self, sections: &mut [Provision]) {
        for (ordinal, section) in sections.iter_mut().enumerate() {
            let key = key_or_ordinal(section, ordinal);
            let id = self.unique(format!("{}_section_{key}", self.doc_id));
            self.finish(section, id.clone(), None, format!("Section {key}"), true);
            self.assign_subsections(section, &key, &id);
        }
    }

    /// Assign the schedules. Unlabelled schedules are shown as "Schedule".
    pub fn assign_schedules(&mut self, schedules: &mut [Provision]) {
        for (ordinal, schedule) in schedules.iter_mut().enumerate() {
            let key = key_or_ordinal(schedule, ordinal);
            let id = self.unique(format!("{}_schedule_{key}", self.doc_id));
            let label = schedule
                .local_id
                .clone()
                .unwrap_or_else(|| "Schedule".to_string());
            self.finish(schedule, id, None, label, false);
        }
    }

    /// `path` is the concatenated keys from the section down to `parent`.
    fn assign_subsections(&mut self, parent: &mut Provision, path: &str, parent_id: &str) {
        for (ordinal, child) in parent.children.iter_mut().enumerate() {
            let key = key_or_ordinal(child, ordinal);
            let id = self.unique(format!("{}_subsection_{path}{key}", self.doc_id));
            let label = format!("Subsection {}{key}", path.to_lowercase());
            self.finish(child, id.clone(), Some(parent_id.to_string()), label, true);

            let child_path = format!("{path}{key}");
            self.assign_subsections(child, &child_path, &id);
        }
    }

    /// Fill the computed fields of one provision.
    ///
    /// `show_headings` controls whether the heading path appears in the
    /// context string; preamble and schedules leave that line empty.
    fn finish(
        &self,
        provision: &mut Provision,
        global_id: String,
        parent_id: Option<String>,
        label: String,
        show_headings: bool,
    ) {
        provision.heading_path_str = provision.headings.join(HEADING_SEPARATOR);
        let heading_line = if show_headings {
            provision.heading_path_str.as_str()
        } else {
            ""
        };
        provision.context_str = [
            self.title.unwrap_or_default(),
            label.as_str(),
            heading_line,
            provision.text.as_str(),
        ]
        .join("\n");

        if let Some(note) = &provision.marginal_note {
            provision.text = format!("**{note}**\n{}", provision.text);
        }

        provision.global_id = global_id;
        provision.parent_id = parent_id;
        provision.label_str = label;
    }

    /// Reserve `candidate`, or the first free `candidate_n` (n >= 2).
    fn unique(&mut self, candidate: String) -> String {
        if self.used.insert(candidate.clone()) {
            return candidate;
        }

        let mut n = 2;
        loop {
            let alternative = format!("{candidate}_{n}");
            if self.used.insert(alternative.clone()) {
                tracing::warn!(
                    id = %candidate,
                    assigned = %alternative,
                    "Duplicate provision key"
                );
                return alternative;
            }
            n += 1;
        }
    }
}

/// Label key of a provision, falling back to its one-based position.
fn key_or_ordinal(provision: &Provision, ordinal: usize) -> String {
    match &provision.local_id {
        Some(id) => id.clone(),
        None => {
            tracing::debug!(
                kind = provision.kind.id_segment(),
                ordinal = ordinal + 1,
                "Provision has no label, using its position"
            );
            (ordinal + 1).to_string()
        }
    }
}

/// Assign identifiers for a whole document.
///
/// # Arguments
/// * `doc_id` - Language-qualified document key, the prefix of every id
/// * `title` - Document title used in context strings
pub fn assign_identifiers(
    doc_id: &str,
    title: Option<&str>,
    preamble: Option<&mut Provision>,
    sections: &mut [Provision],
    schedules: &mut [Provision],
) {
    let mut assigner = IdAssigner::new(doc_id, title);
    if let Some(preamble) = preamble {
        assigner.assign_preamble(preamble);
    }
    assigner.assign_sections(sections);
    assigner.assign_schedules(schedules);

    tracing::debug!(ids = assigner.used.len(), "Assigned provision identifiers");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProvisionKind;
    use pretty_assertions::assert_eq;

    fn section(label: &str, text: &str) -> Provision {
        Provision::new(ProvisionKind::Section, text).with_local_id(label)
    }

    fn subsection(label: &str, text: &str) -> Provision {
        Provision::new(ProvisionKind::Subsection, text).with_local_id(label)
    }

    #[test]
    fn test_section_and_subsection_ids() {
        let mut sections = vec![section("5", "Body").with_children(vec![
            subsection("(a)", "A").with_children(vec![subsection("(i)", "I")]),
        ])];

        assign_identifiers("A-1_eng", Some("Test Act"), None, &mut sections, &mut []);

        let s = &sections[0];
        assert_eq!(s.global_id, "A-1_eng_section_5");
        assert_eq!(s.label_str, "Section 5");
        assert_eq!(s.parent_id, None);

        let sub = &s.children[0];
        assert_eq!(sub.global_id, "A-1_eng_subsection_5(a)");
        assert_eq!(sub.label_str, "Subsection 5(a)");
        assert_eq!(sub.parent_id.as_deref(), Some("A-1_eng_section_5"));

        let nested = &sub.children[0];
        assert_eq!(nested.global_id, "A-1_eng_subsection_5(a)(i)");
        assert_eq!(nested.label_str, "Subsection 5(a)(i)");
        assert_eq!(nested.parent_id.as_deref(), Some("A-1_eng_subsection_5(a)"));
    }

    #[test]
    fn test_subsection_label_lowercases_section_key() {
        let mut sections = vec![section("5A", "").with_children(vec![subsection("(1)", "")])];
        assign_identifiers("C-46_eng", None, None, &mut sections, &mut []);

        assert_eq!(sections[0].children[0].label_str, "Subsection 5a(1)");
        assert_eq!(sections[0].children[0].global_id, "C-46_eng_subsection_5A(1)");
    }

    #[test]
    fn test_marginal_note_prefix_and_context() {
        let mut s = section("2", "In this Act,");
        s.marginal_note = Some("Definitions".to_string());
        s.headings = vec!["Interpretation".to_string(), "General".to_string()];
        let mut sections = vec![s];

        assign_identifiers("A-1_eng", Some("Test Act"), None, &mut sections, &mut []);

        let s = &sections[0];
        assert_eq!(s.text, "**Definitions**\nIn this Act,");
        assert_eq!(s.heading_path_str, "Interpretation > General");
        assert_eq!(
            s.context_str,
            "Test Act\nSection 2\nInterpretation > General\nIn this Act,"
        );
    }

    #[test]
    fn test_preamble_ids() {
        let mut preamble = Provision::new(ProvisionKind::Preamble, "Whereas")
            .with_local_id("preamble")
            .with_children(vec![
                Provision::new(ProvisionKind::PreambleProvision, "first").with_local_id("0"),
                Provision::new(ProvisionKind::PreambleProvision, "second").with_local_id("1"),
            ]);
        preamble.headings = vec!["Heading".to_string()];

        assign_identifiers("A-1_eng", Some("Act"), Some(&mut preamble), &mut [], &mut []);

        assert_eq!(preamble.global_id, "A-1_eng_preamble");
        assert_eq!(preamble.label_str, "Preamble");
        assert_eq!(preamble.heading_path_str, "Heading");
        assert_eq!(preamble.context_str, "Act\nPreamble\n\nWhereas");

        let second = &preamble.children[1];
        assert_eq!(second.global_id, "A-1_eng_preamble_provision_1");
        assert_eq!(second.label_str, "Preamble provision 1");
        assert_eq!(second.parent_id.as_deref(), Some("A-1_eng_preamble"));
    }

    #[test]
    fn test_schedule_labels() {
        let mut schedules = vec![
            Provision::new(ProvisionKind::Schedule, "List").with_local_id("SCHEDULE I"),
            Provision::new(ProvisionKind::Schedule, "Form"),
        ];
        assign_identifiers("SOR-2020-1_eng", None, None, &mut [], &mut schedules);

        assert_eq!(schedules[0].global_id, "SOR-2020-1_eng_schedule_SCHEDULE I");
        assert_eq!(schedules[0].label_str, "SCHEDULE I");
        assert_eq!(schedules[1].global_id, "SOR-2020-1_eng_schedule_2");
        assert_eq!(schedules[1].label_str, "Schedule");
        assert_eq!(schedules[1].context_str, "\nSchedule\n\nForm");
    }

    #[test]
    fn test_missing_label_uses_position() {
        let mut sections = vec![
            section("1", ""),
            Provision::new(ProvisionKind::Section, "unlabelled"),
        ];
        assign_identifiers("X_eng", None, None, &mut sections, &mut []);

        assert_eq!(sections[1].global_id, "X_eng_section_2");
        assert_eq!(sections[1].label_str, "Section 2");
        assert_eq!(sections[1].local_id, None);
    }

    #[test]
    fn test_duplicate_keys_are_disambiguated() {
        let mut sections = vec![section("1", "a"), section("1", "b"), section("1", "c")];
        assign_identifiers("X_eng", None, None, &mut sections, &mut []);

        let ids: Vec<_> = sections.iter().map(|s| s.global_id.as_str()).collect();
        assert_eq!(ids, vec!["X_eng_section_1", "X_eng_section_1_2", "X_eng_section_1_3"]);
    }
}
