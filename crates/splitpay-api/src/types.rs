//! Request and response bodies. Everything is camelCase on the wire and decimals
//! travel as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitpay_core::{
    AllocationState, AllocationSummary, Field, FinalizedAllocation, Participant, SplitWizard,
    TipChoice, WizardStep,
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub contacts: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub session: SessionSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub contact_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    /// Base amount as typed
    pub base: String,
    #[serde(default)]
    pub tip: TipChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFieldRequest {
    pub field: Field,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitFieldRequest {
    pub field: Field,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmountSnapshot {
    pub base_text: String,
    pub tip: TipChoice,
    pub tip_percent: Decimal,
    pub total: Option<Decimal>,
    pub formatted_total: String,
}

/// Everything a front-end needs to render the current wizard screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub step: WizardStep,
    pub step_number: u8,
    pub can_proceed: bool,
    pub contacts: Vec<ContactRow>,
    pub selected_count: usize,
    pub all_selected: bool,
    pub partially_selected: bool,
    pub amount: AmountSnapshot,
    pub allocation: AllocationState,
    pub summary: AllocationSummary,
}

impl SessionSnapshot {
    pub fn from_wizard(wizard: &SplitWizard) -> Self {
        let contacts = wizard.contacts();
        let amount = wizard.amount();
        Self {
            step: wizard.step(),
            step_number: wizard.step().number(),
            can_proceed: wizard.can_proceed(),
            contacts: contacts
                .rows()
                .iter()
                .map(|row| ContactRow {
                    id: row.id.clone(),
                    name: row.name.clone(),
                    initials: row.initials(),
                    selected: contacts.is_selected(&row.id),
                })
                .collect(),
            selected_count: contacts.selected_count(),
            all_selected: contacts.is_all_selected(),
            partially_selected: contacts.is_partially_selected(),
            amount: AmountSnapshot {
                base_text: amount.base_text().to_string(),
                tip: amount.tip().clone(),
                tip_percent: amount.tip_percent(),
                total: amount.total(),
                formatted_total: amount.formatted_total(),
            },
            allocation: wizard.engine().state().clone(),
            summary: wizard.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub total: Decimal,
    pub allocations: Vec<FinalizedAllocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
    pub uptime_seconds: u64,
}
