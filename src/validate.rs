//! Post-creation validation collaborator.
//!
//! The reference deployment advertises an "AI validation" step after the
//! transaction confirms. The interface is the contract; the shipped
//! implementation is a stub that reports the requested configuration back.
//! A real implementation would read the mint account and compare.

use async_trait::async_trait;
use serde::Serialize;

use crate::flow::CreatedToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Perfect,
    Warning,
    CriticalIssue,
}

/// Authority state echoed back to the user; `None` means revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintAuthorities {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub summary: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub authorities: MintAuthorities,
}

/// Validator run after a confirmed creation. Infallible by contract:
/// implementations fold their own failures into a `Warning` report rather
/// than failing a creation that already succeeded on-chain.
#[async_trait(?Send)]
pub trait TokenValidator {
    async fn validate(&self, token: &CreatedToken) -> ValidationReport;
}

/// Fixed-success validator matching the reference deployment.
pub struct StubValidator;

#[async_trait(?Send)]
impl TokenValidator for StubValidator {
    async fn validate(&self, token: &CreatedToken) -> ValidationReport {
        ValidationReport {
            status: ValidationStatus::Perfect,
            summary: "Token created successfully! All authorities configured as requested."
                .to_string(),
            issues: Vec::new(),
            recommendations: vec!["Your token is ready to use.".to_string()],
            authorities: MintAuthorities {
                mint_authority: (!token.revoke.mint).then(|| token.owner.clone()),
                freeze_authority: (!token.revoke.freeze).then(|| token.owner.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::TokenSummary;
    use crate::request::RevokeFlags;

    fn created(revoke: RevokeFlags) -> CreatedToken {
        CreatedToken {
            mint_address: "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH".to_string(),
            signature: "sig".to_string(),
            owner: "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB".to_string(),
            metadata: TokenSummary {
                name: "Demo".to_string(),
                symbol: "DMO".to_string(),
                decimals: 6,
                supply: 1_000_000,
            },
            image_url: String::new(),
            metadata_uri: String::new(),
            service_fee_lamports: 150_000_000,
            explorer_url: String::new(),
            revoke,
        }
    }

    #[tokio::test]
    async fn test_stub_reports_success_and_echoes_authorities() {
        let token = created(RevokeFlags {
            mint: true,
            ..RevokeFlags::default()
        });
        let report = StubValidator.validate(&token).await;
        assert_eq!(report.status, ValidationStatus::Perfect);
        assert!(report.issues.is_empty());
        assert_eq!(report.authorities.mint_authority, None);
        assert_eq!(
            report.authorities.freeze_authority.as_deref(),
            Some("DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB")
        );
    }
}
