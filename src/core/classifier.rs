//! Classifier
//!
//! Resolves a mint's authority, then checks it against the rugged list and
//! the good list, in that order. Pure read composition: never mutates lists.

use std::time::Duration;
use tracing::info;

use super::address_list::AddressListStore;
use super::resolver::AuthorityResolver;
use crate::models::errors::AppResult;
use crate::models::types::{Address, ClassificationResult, ListName, Verdict};

#[derive(Clone)]
pub struct Classifier {
    resolver: AuthorityResolver,
    store: AddressListStore,
}

impl Classifier {
    pub fn new(resolver: AuthorityResolver, store: AddressListStore) -> Self {
        Self { resolver, store }
    }

    pub fn resolver(&self) -> &AuthorityResolver {
        &self.resolver
    }

    pub fn store(&self) -> &AddressListStore {
        &self.store
    }

    /// Classify with the resolver's configured timeout
    pub async fn classify(&self, mint_address: &str) -> AppResult<ClassificationResult> {
        self.classify_with_timeout(mint_address, self.resolver.timeout())
            .await
    }

    /// Resolution failures propagate unchanged; no verdict is produced for them.
    pub async fn classify_with_timeout(
        &self,
        mint_address: &str,
        timeout: Duration,
    ) -> AppResult<ClassificationResult> {
        let record = self
            .resolver
            .resolve_with_timeout(mint_address, timeout)
            .await?;

        let Some(authority) = record.authority.as_ref().map(Address::from) else {
            info!(mint = %record.mint_address, "➖ no authority, classification not applicable");
            return Ok(ClassificationResult {
                authority: None,
                verdict: Verdict::NotApplicable,
                record,
            });
        };

        let verdict = self.verdict_for(&authority).await;
        info!(
            mint = %record.mint_address,
            authority = %authority,
            "{} verdict: {}",
            verdict.emoji(),
            verdict
        );

        Ok(ClassificationResult {
            authority: Some(authority),
            verdict,
            record,
        })
    }

    /// Rugged wins over good when an address is on both lists.
    pub async fn verdict_for(&self, authority: &Address) -> Verdict {
        if self.store.contains(ListName::Rugged, authority.as_str()).await {
            Verdict::Rugged
        } else if self.store.contains(ListName::Good, authority.as_str()).await {
            Verdict::Good
        } else {
            Verdict::Unknown
        }
    }
}
