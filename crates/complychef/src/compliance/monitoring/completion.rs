use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::catalog::{CheckCatalog, CheckSource, ComplianceSection};
use super::domain::{CheckRecord, EquipmentInstance, Shift};

/// Completion state of one catalog check for one shift.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckCompletionEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub section: ComplianceSection,
    pub done: bool,
    pub failed: bool,
    pub awaiting_setup: bool,
    pub outstanding: Vec<String>,
}

impl CheckCompletionEntry {
    pub fn to_view(&self) -> CheckCompletionView {
        CheckCompletionView {
            key: self.key,
            name: self.name,
            section: self.section,
            section_label: self.section.label(),
            done: self.done,
            failed: self.failed,
            awaiting_setup: self.awaiting_setup,
            outstanding: self.outstanding.clone(),
        }
    }
}

/// Recomputed completion picture for one (date, shift). Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftCompletionReport {
    pub date: NaiveDate,
    pub shift: Shift,
    pub entries: Vec<CheckCompletionEntry>,
}

impl ShiftCompletionReport {
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.done)
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|entry| entry.failed)
    }

    pub fn summary(&self) -> ShiftCompletionSummary {
        let sections = ComplianceSection::ordered()
            .into_iter()
            .filter_map(|section| {
                let mut done = 0;
                let mut failed = 0;
                let mut total = 0;
                for entry in self.entries.iter().filter(|entry| entry.section == section) {
                    total += 1;
                    if entry.done {
                        done += 1;
                    }
                    if entry.failed {
                        failed += 1;
                    }
                }

                (total > 0).then_some(SectionProgressEntry {
                    section,
                    section_label: section.label(),
                    done,
                    failed,
                    total,
                })
            })
            .collect();

        ShiftCompletionSummary {
            date: self.date,
            shift: self.shift,
            shift_label: self.shift.label(),
            complete: self.is_complete(),
            has_failures: self.has_failures(),
            sections,
            checks: self
                .entries
                .iter()
                .map(CheckCompletionEntry::to_view)
                .collect(),
        }
    }
}

/// Serialized rollup for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftCompletionSummary {
    pub date: NaiveDate,
    pub shift: Shift,
    pub shift_label: &'static str,
    pub complete: bool,
    pub has_failures: bool,
    pub sections: Vec<SectionProgressEntry>,
    pub checks: Vec<CheckCompletionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionProgressEntry {
    pub section: ComplianceSection,
    pub section_label: &'static str,
    pub done: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckCompletionView {
    pub key: &'static str,
    pub name: &'static str,
    pub section: ComplianceSection,
    pub section_label: &'static str,
    pub done: bool,
    pub failed: bool,
    pub awaiting_setup: bool,
    pub outstanding: Vec<String>,
}

/// Walks the catalog against the shift's logs and the organization's live
/// configuration. Disabled sections are excluded from the denominator
/// entirely; an enabled equipment check with zero active instances reports
/// as not done rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct ShiftReconciler<'a> {
    catalog: &'a CheckCatalog,
}

impl<'a> ShiftReconciler<'a> {
    pub fn new(catalog: &'a CheckCatalog) -> Self {
        Self { catalog }
    }

    pub fn reconcile(
        &self,
        enabled_sections: &BTreeSet<ComplianceSection>,
        equipment: &[EquipmentInstance],
        records: &[CheckRecord],
        date: NaiveDate,
        shift: Shift,
    ) -> ShiftCompletionReport {
        let records: Vec<&CheckRecord> = records
            .iter()
            .filter(|record| record.date == date && record.shift == shift)
            .collect();

        let entries = self
            .catalog
            .definitions()
            .iter()
            .filter(|definition| enabled_sections.contains(&definition.section))
            .map(|definition| match definition.source {
                CheckSource::Equipment(class) => {
                    let instances: Vec<&EquipmentInstance> = equipment
                        .iter()
                        .filter(|instance| {
                            instance.active && instance.class == class && instance.shift == shift
                        })
                        .collect();

                    if instances.is_empty() {
                        return CheckCompletionEntry {
                            key: definition.key,
                            name: definition.name,
                            section: definition.section,
                            done: false,
                            failed: false,
                            awaiting_setup: true,
                            outstanding: Vec::new(),
                        };
                    }

                    let mut outstanding = Vec::new();
                    let mut failed = false;
                    for instance in &instances {
                        let mut logged = false;
                        for record in records.iter().filter(|record| {
                            record.check_key == definition.key
                                && record.equipment_instance.as_ref() == Some(&instance.id)
                        }) {
                            logged = true;
                            if !record.status.is_pass() {
                                failed = true;
                            }
                        }

                        if !logged {
                            outstanding.push(instance.name.clone());
                        }
                    }

                    CheckCompletionEntry {
                        key: definition.key,
                        name: definition.name,
                        section: definition.section,
                        done: outstanding.is_empty(),
                        failed,
                        awaiting_setup: false,
                        outstanding,
                    }
                }
                _ => {
                    let mut done = false;
                    let mut failed = false;
                    for record in records
                        .iter()
                        .filter(|record| record.check_key == definition.key)
                    {
                        done = true;
                        if !record.status.is_pass() {
                            failed = true;
                        }
                    }

                    CheckCompletionEntry {
                        key: definition.key,
                        name: definition.name,
                        section: definition.section,
                        done,
                        failed,
                        awaiting_setup: false,
                        outstanding: Vec::new(),
                    }
                }
            })
            .collect();

        ShiftCompletionReport {
            date,
            shift,
            entries,
        }
    }
}
