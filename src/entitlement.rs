//! Entitlement collaborator consulted by the watermark and the export gate.

use crate::foundation::error::ShotframeResult;

/// Paid status plus billing identifiers as last verified.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Unix seconds of the last successful verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified_at: Option<u64>,
}

pub trait Entitlement {
    fn is_entitled(&self) -> bool;

    /// Free exports left before the gate refuses non-entitled users.
    fn remaining_free_uses(&self) -> u32;

    /// Count one free export.
    fn record_use(&mut self);

    /// Re-check the paid status. Returns the entitlement after verification.
    fn verify(&mut self) -> ShotframeResult<bool>;

    /// Drop paid status and billing identifiers.
    fn revoke(&mut self);
}

/// In-memory quota with a fixed number of free exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalQuota {
    record: EntitlementRecord,
    free_limit: u32,
    used: u32,
}

impl LocalQuota {
    pub const DEFAULT_FREE_USES: u32 = 3;

    pub fn new(free_limit: u32) -> Self {
        Self {
            record: EntitlementRecord::default(),
            free_limit,
            used: 0,
        }
    }

    /// Quota for an already paid customer.
    pub fn paid(record: EntitlementRecord) -> Self {
        Self {
            record: EntitlementRecord {
                paid: true,
                ..record
            },
            free_limit: Self::DEFAULT_FREE_USES,
            used: 0,
        }
    }

    pub fn record(&self) -> &EntitlementRecord {
        &self.record
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    /// Mark the customer as paid, as a completed checkout would.
    pub fn grant(&mut self, customer_id: impl Into<String>, subscription_id: impl Into<String>) {
        self.record = EntitlementRecord {
            paid: true,
            customer_id: Some(customer_id.into()),
            subscription_id: Some(subscription_id.into()),
            last_verified_at: Some(unix_now()),
        };
        tracing::info!("entitlement granted");
    }
}

impl Default for LocalQuota {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FREE_USES)
    }
}

impl Entitlement for LocalQuota {
    fn is_entitled(&self) -> bool {
        self.record.paid
    }

    fn remaining_free_uses(&self) -> u32 {
        self.free_limit.saturating_sub(self.used)
    }

    fn record_use(&mut self) {
        self.used = self.used.saturating_add(1);
        tracing::debug!(used = self.used, limit = self.free_limit, "free use recorded");
    }

    fn verify(&mut self) -> ShotframeResult<bool> {
        if self.record.paid {
            self.record.last_verified_at = Some(unix_now());
        }
        Ok(self.record.paid)
    }

    fn revoke(&mut self) {
        if self.record.paid {
            tracing::info!("entitlement revoked");
        }
        self.record = EntitlementRecord::default();
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../tests/unit/entitlement.rs"]
mod tests;
