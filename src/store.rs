use crate::models::{AuditReport, AuditSummary};
use std::collections::{HashMap, VecDeque};

/// How many audit reports the store keeps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retention {
    #[default]
    KeepAll,
    /// Oldest reports are evicted first.
    MaxEntries(usize),
}

/// In-memory audit reports keyed by audit id
#[derive(Debug, Default)]
pub struct AuditStore {
    reports: HashMap<String, AuditReport>,
    order: VecDeque<String>,
    retention: Retention,
}

impl AuditStore {
    pub fn new(retention: Retention) -> Self {
        Self {
            reports: HashMap::new(),
            order: VecDeque::new(),
            retention,
        }
    }

    /// Stores a report, replacing any report with the same id
    pub fn insert(&mut self, report: AuditReport) {
        let id = report.audit_id.clone();
        if self.reports.insert(id.clone(), report).is_some() {
            self.order.retain(|existing| existing != &id);
        }
        self.order.push_back(id);

        if let Retention::MaxEntries(max) = self.retention {
            while self.order.len() > max {
                if let Some(oldest) = self.order.pop_front() {
                    tracing::debug!(audit_id = %oldest, "Evicting audit report");
                    self.reports.remove(&oldest);
                }
            }
        }
    }

    pub fn get(&self, audit_id: &str) -> Option<&AuditReport> {
        self.reports.get(audit_id)
    }

    /// Summaries of stored audits, oldest first
    pub fn history(&self) -> Vec<AuditSummary> {
        self.order
            .iter()
            .filter_map(|id| self.reports.get(id))
            .map(|report| AuditSummary {
                audit_id: report.audit_id.clone(),
                url: report.url.clone(),
                timestamp: report.timestamp.clone(),
                seo_score: report.seo_score,
                pages_audited: report.crawl_summary.total_pages,
                issues_count: report.issues.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
