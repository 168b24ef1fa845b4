//! Display implementations for domain models.
//!
//! All Display trait implementations for the core domain models live here,
//! separated from the model definitions. Output is markdown with status icons
//! and structured sections for rich terminal display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    ChecklistTask, InspectionPlan, InspectionReport, Notification, NotificationKind, PlanSummary,
    ReportStatus, RescheduleRequest, RescheduleStatus, RiskCategory, StatusLogEntry, TaskStatus,
};

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RescheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for InspectionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Equipment: {}", self.equipment_id)?;
        if let Some(location) = &self.location {
            writeln!(f, "- Location: {location}")?;
        }
        writeln!(f, "- Risk: {}", self.risk_category)?;
        if let Some(kind) = &self.inspection_type {
            writeln!(f, "- Type: {kind}")?;
        }
        if self.inspectors.is_empty() {
            writeln!(f, "- Inspector: {}", self.inspector)?;
        } else {
            writeln!(f, "- Inspectors: {}", self.inspectors.join(", "))?;
        }
        writeln!(f, "- Window: {} .. {}", self.start, self.end)?;
        writeln!(f, "- Due: {}", self.due_date)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(outcome) = &self.outcome {
            writeln!(f)?;
            writeln!(f, "## Outcome")?;
            writeln!(f)?;
            writeln!(f, "{outcome}")?;
        }

        if let Some(request) = &self.reschedule_request {
            writeln!(f)?;
            writeln!(f, "## Reschedule request")?;
            writeln!(f)?;
            write!(f, "{request}")?;
        }

        if !self.tasks.is_empty() {
            writeln!(f, "\n## Checklist")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        } else {
            writeln!(f, "\nNo checklist tasks in this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for RescheduleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Proposed window: {} .. {}", self.start_date, self.end_date)?;
        writeln!(f, "- Reason: {}", self.reason)?;
        writeln!(f, "- Requested by: {}", self.requested_by)?;
        writeln!(f, "- Requested at: {}", LocalDateTime(&self.requested_at))?;
        writeln!(f, "- Decision: {}", self.status)?;
        if let Some(rejection) = &self.rejection_reason {
            writeln!(f, "- Rejection reason: {rejection}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChecklistTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} {} (ID: {})", self.status.with_icon(), self.text, self.id)
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Report for plan {}", self.plan_id)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(findings) = &self.findings {
            writeln!(f)?;
            writeln!(f, "{findings}")?;
        }

        if !self.photo_report.is_empty() {
            writeln!(f, "\n## Photo findings")?;
            writeln!(f)?;
            for (index, finding) in self.photo_report.iter().enumerate() {
                writeln!(f, "### {}. {}", index + 1, finding.finding)?;
                writeln!(f)?;
                writeln!(f, "{}", finding.recommendation)?;
                for url in &finding.photo_urls {
                    writeln!(f, "- {url}")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.read { " " } else { "*" };
        writeln!(
            f,
            "{marker} [{}] {} (ID: {}, {})",
            self.kind,
            self.title,
            self.id,
            LocalDateTime(&self.created_at)
        )?;
        writeln!(f, "  {}", self.message)?;
        if let Some(link) = &self.link {
            writeln!(f, "  {link}")?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} -> {} by {} at {}",
            self.old_status,
            self.new_status,
            self.changed_by,
            LocalDateTime(&self.timestamp)
        )
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.completed_tasks, self.total_tasks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        writeln!(f, "- **Equipment**: {}", self.equipment_id)?;
        writeln!(f, "- **Inspector**: {}", self.inspector)?;
        writeln!(f, "- **Risk**: {}", self.risk_category)?;
        writeln!(f, "- **Window**: {} .. {}", self.start, self.end)?;
        writeln!(f, "- **Due**: {}", self.due_date)?;
        if self.has_pending_reschedule {
            writeln!(f, "- **Reschedule**: pending")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
