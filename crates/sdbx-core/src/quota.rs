//! Usage quota gate.
//!
//! Uploads are gated on the backend's usage counters and the gate fails
//! closed: until a check has succeeded, nothing is admitted. A backend
//! that reports no usable count gets the benefit of the doubt, since the
//! server enforces the real limit on every upload anyway.

use crate::api::{ExtractionApi, UsageQuota};
use crate::error::{ApiError, BatchError};

/// Result of a quota check, queried before a batch is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaGate {
    quota: UsageQuota,
    exhausted: bool,
}

impl QuotaGate {
    /// Query the backend and build the gate.
    ///
    /// A quota 403 yields an exhausted gate rather than an error; any
    /// other failure propagates and uploads stay disabled.
    pub async fn check<A: ExtractionApi>(api: &A, tool: &str) -> Result<Self, ApiError> {
        match api.check_usage(tool).await {
            Ok(quota) => Ok(Self::from_quota(quota)),
            Err(ApiError::QuotaExhausted { remaining }) => Ok(Self {
                quota: UsageQuota {
                    available_count: remaining,
                    limit: None,
                },
                exhausted: true,
            }),
            Err(e) => Err(e),
        }
    }

    /// Build the gate from already-fetched counters.
    pub fn from_quota(quota: UsageQuota) -> Self {
        let exhausted = matches!(quota.available_count, Some(n) if n <= 0);
        Self { quota, exhausted }
    }

    /// Whether any upload is possible. An unknown count does not block.
    pub fn can_upload(&self) -> bool {
        !self.exhausted
    }

    /// All-or-nothing admission for a batch of `n` files.
    ///
    /// A known remaining count below `n` rejects the whole batch before
    /// any request is issued.
    pub fn admit(&self, n: usize) -> Result<(), BatchError> {
        if self.exhausted {
            return Err(BatchError::QuotaExhausted {
                remaining: self.quota.available_count,
            });
        }
        match self.quota.available_count {
            Some(available) if available < n as i64 => Err(BatchError::QuotaDenied {
                requested: n,
                available,
            }),
            _ => Ok(()),
        }
    }

    /// Uploads remaining, when the backend stated a number.
    pub fn remaining(&self) -> Option<i64> {
        self.quota.available_count
    }

    /// Account limit, when the backend stated a number.
    pub fn limit(&self) -> Option<i64> {
        self.quota.limit
    }

    /// The underlying counters.
    pub fn quota(&self) -> UsageQuota {
        self.quota
    }
}
