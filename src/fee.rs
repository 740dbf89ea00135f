//! Service-fee schedule.
//!
//! Fees are exact lamport amounts; SOL figures exist only for display.

use crate::request::RevokeFlags;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Base fee for every creation (0.1 SOL).
pub const BASE_FEE_LAMPORTS: u64 = 100_000_000;

/// Additional fee per revoked authority (0.05 SOL).
pub const REVOKE_FEE_LAMPORTS: u64 = 50_000_000;

/// The fee a creation will transfer to the operator wallet. Pure function of
/// the revoke selection; holds no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceFee {
    lamports: u64,
}

impl ServiceFee {
    pub fn quote(revoke: &RevokeFlags) -> ServiceFee {
        ServiceFee {
            lamports: BASE_FEE_LAMPORTS + REVOKE_FEE_LAMPORTS * u64::from(revoke.count()),
        }
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }

    pub fn sol(&self) -> f64 {
        self.lamports as f64 / LAMPORTS_PER_SOL as f64
    }

    /// Two-decimal SOL figure for user display.
    pub fn display_sol(&self) -> String {
        format!("{:.2}", self.sol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, false, 100_000_000)]
    #[case(true, false, false, 150_000_000)]
    #[case(false, true, false, 150_000_000)]
    #[case(false, false, true, 150_000_000)]
    #[case(true, true, false, 200_000_000)]
    #[case(true, false, true, 200_000_000)]
    #[case(false, true, true, 200_000_000)]
    #[case(true, true, true, 250_000_000)]
    fn fee_covers_every_revoke_combination(
        #[case] freeze: bool,
        #[case] mint: bool,
        #[case] update: bool,
        #[case] expected_lamports: u64,
    ) {
        let revoke = RevokeFlags {
            freeze,
            mint,
            update,
        };
        let fee = ServiceFee::quote(&revoke);
        assert_eq!(fee.lamports(), expected_lamports);
        assert_eq!(
            fee.lamports(),
            BASE_FEE_LAMPORTS + REVOKE_FEE_LAMPORTS * u64::from(revoke.count())
        );
    }

    #[test]
    fn test_display_truncates_to_two_decimals() {
        let base = ServiceFee::quote(&RevokeFlags::default());
        assert_eq!(base.display_sol(), "0.10");

        let one = ServiceFee::quote(&RevokeFlags {
            mint: true,
            ..RevokeFlags::default()
        });
        assert_eq!(one.display_sol(), "0.15");

        let all = ServiceFee::quote(&RevokeFlags {
            freeze: true,
            mint: true,
            update: true,
        });
        assert_eq!(all.display_sol(), "0.25");
    }
}
