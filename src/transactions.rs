//! Transaction sample dataset and derived statistics.
//!
//! A fixed catalog of program templates crossed with company pairs and
//! naming variations, capped to 25 records. The dataset is materialized
//! once at construction and never mutated; every query runs over that
//! read-only snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Active,
    Pending,
    Draft,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    BrandNew,
    Renewal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub ceding_company: String,
    pub reinsurer: String,
    pub effective_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub gross_earned_premium: f64,
    /// Percent of premium ceded under the treaty.
    pub quota_share: f64,
    /// Derived: gross earned premium x quota share / 100.
    pub premium: f64,
    pub status: TransactionStatus,
    pub kind: TransactionKind,
    pub subject_business: String,
    /// Display-only noise, deterministic but carrying no contract
    /// guarantees; tests must not assert on it.
    pub contract_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring match on name, ceding company, reinsurer.
    pub search: Option<String>,
    /// Set membership; `None` means any status.
    pub status: Option<Vec<TransactionStatus>>,
    pub limit: Option<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub draft: usize,
    pub cancelled: usize,
    pub total_premium: f64,
    /// Rounded mean premium; 0 over an empty set.
    pub average_premium: f64,
}

impl TransactionStats {
    pub fn from_records(records: &[Transaction]) -> Self {
        let total = records.len();
        let count = |s: TransactionStatus| records.iter().filter(|t| t.status == s).count();
        let total_premium: f64 = records.iter().map(|t| t.premium).sum();
        let average_premium = if total == 0 {
            0.0
        } else {
            (total_premium / total as f64).round()
        };
        Self {
            total,
            active: count(TransactionStatus::Active),
            pending: count(TransactionStatus::Pending),
            draft: count(TransactionStatus::Draft),
            cancelled: count(TransactionStatus::Cancelled),
            total_premium,
            average_premium,
        }
    }
}

struct ProgramTemplate {
    name: &'static str,
    subject_business: &'static str,
    gross_earned_premium: f64,
    quota_share: f64,
    status: TransactionStatus,
    kind: TransactionKind,
    effective: (i32, u32, u32),
}

const PROGRAMS: [ProgramTemplate; 20] = [
    ProgramTemplate {
        name: "Property Quota Share",
        subject_business: "Commercial property, all risks, US and Canada",
        gross_earned_premium: 48_500_000.0,
        quota_share: 25.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 1, 1),
    },
    ProgramTemplate {
        name: "Motor Proportional",
        subject_business: "Private passenger auto liability and physical damage",
        gross_earned_premium: 32_000_000.0,
        quota_share: 30.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 1, 1),
    },
    ProgramTemplate {
        name: "Casualty Cession",
        subject_business: "General liability, excess of primary retentions",
        gross_earned_premium: 27_250_000.0,
        quota_share: 20.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::BrandNew,
        effective: (2024, 4, 1),
    },
    ProgramTemplate {
        name: "Marine Cargo Treaty",
        subject_business: "Ocean cargo and inland transit, worldwide",
        gross_earned_premium: 15_800_000.0,
        quota_share: 40.0,
        status: TransactionStatus::Pending,
        kind: TransactionKind::Renewal,
        effective: (2024, 7, 1),
    },
    ProgramTemplate {
        name: "Aviation Hull Program",
        subject_business: "Airline hull and spares, scheduled carriers",
        gross_earned_premium: 12_400_000.0,
        quota_share: 35.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 1, 1),
    },
    ProgramTemplate {
        name: "Workers Comp Share",
        subject_business: "Statutory workers compensation, guaranteed cost",
        gross_earned_premium: 41_000_000.0,
        quota_share: 15.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 1, 1),
    },
    ProgramTemplate {
        name: "Professional Lines QS",
        subject_business: "Errors and omissions, miscellaneous professions",
        gross_earned_premium: 18_600_000.0,
        quota_share: 45.0,
        status: TransactionStatus::Pending,
        kind: TransactionKind::BrandNew,
        effective: (2024, 10, 1),
    },
    ProgramTemplate {
        name: "Cyber Portfolio Treaty",
        subject_business: "Network security and privacy liability, SME book",
        gross_earned_premium: 9_700_000.0,
        quota_share: 50.0,
        status: TransactionStatus::Draft,
        kind: TransactionKind::BrandNew,
        effective: (2025, 1, 1),
    },
    ProgramTemplate {
        name: "Homeowners Cession",
        subject_business: "Personal lines homeowners, coastal exposure managed",
        gross_earned_premium: 36_300_000.0,
        quota_share: 22.5,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 6, 1),
    },
    ProgramTemplate {
        name: "Energy Onshore Program",
        subject_business: "Onshore energy property, operational risks only",
        gross_earned_premium: 22_900_000.0,
        quota_share: 30.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 3, 1),
    },
    ProgramTemplate {
        name: "Surety Bond Share",
        subject_business: "Contract and commercial surety, investment grade",
        gross_earned_premium: 8_150_000.0,
        quota_share: 40.0,
        status: TransactionStatus::Cancelled,
        kind: TransactionKind::Renewal,
        effective: (2023, 1, 1),
    },
    ProgramTemplate {
        name: "Agriculture MPCI Treaty",
        subject_business: "Multi-peril crop insurance, midwest corn and soy",
        gross_earned_premium: 29_400_000.0,
        quota_share: 25.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 2, 1),
    },
    ProgramTemplate {
        name: "Medical Stop Loss QS",
        subject_business: "Employer stop loss, specific and aggregate",
        gross_earned_premium: 24_800_000.0,
        quota_share: 35.0,
        status: TransactionStatus::Pending,
        kind: TransactionKind::Renewal,
        effective: (2024, 7, 1),
    },
    ProgramTemplate {
        name: "Inland Marine Program",
        subject_business: "Contractors equipment and builders risk",
        gross_earned_premium: 11_200_000.0,
        quota_share: 30.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::BrandNew,
        effective: (2024, 5, 1),
    },
    ProgramTemplate {
        name: "Trade Credit Cession",
        subject_business: "Whole-turnover trade credit, European obligors",
        gross_earned_premium: 14_500_000.0,
        quota_share: 45.0,
        status: TransactionStatus::Draft,
        kind: TransactionKind::BrandNew,
        effective: (2025, 1, 1),
    },
    ProgramTemplate {
        name: "Umbrella Liability Share",
        subject_business: "Commercial umbrella over admitted primaries",
        gross_earned_premium: 19_900_000.0,
        quota_share: 20.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::Renewal,
        effective: (2024, 1, 1),
    },
    ProgramTemplate {
        name: "Pet Health Treaty",
        subject_business: "Companion animal accident and illness",
        gross_earned_premium: 6_800_000.0,
        quota_share: 50.0,
        status: TransactionStatus::Active,
        kind: TransactionKind::BrandNew,
        effective: (2024, 9, 1),
    },
    ProgramTemplate {
        name: "Builders Risk Program",
        subject_business: "Ground-up commercial construction, 36-month terms",
        gross_earned_premium: 16_700_000.0,
        quota_share: 27.5,
        status: TransactionStatus::Pending,
        kind: TransactionKind::BrandNew,
        effective: (2024, 11, 1),
    },
    ProgramTemplate {
        name: "Equine Mortality Share",
        subject_business: "Bloodstock mortality and theft, UK and Ireland",
        gross_earned_premium: 4_300_000.0,
        quota_share: 60.0,
        status: TransactionStatus::Cancelled,
        kind: TransactionKind::Renewal,
        effective: (2023, 6, 1),
    },
    ProgramTemplate {
        name: "Flood Excess Cession",
        subject_business: "Residential flood, non-NFIP private market",
        gross_earned_premium: 13_100_000.0,
        quota_share: 32.5,
        status: TransactionStatus::Draft,
        kind: TransactionKind::BrandNew,
        effective: (2025, 2, 1),
    },
];

const COMPANY_PAIRS: [(&str, &str); 20] = [
    ("Atlas Mutual Insurance", "Meridian Re"),
    ("Hartwell Specialty", "Northwind Reinsurance"),
    ("Bluepeak Insurance Group", "Caldera Re"),
    ("Stonebridge P&C", "Auriga Reinsurance"),
    ("Lakeshore National", "Tempest Re"),
    ("Vanguard Marine Underwriters", "Polaris Re"),
    ("Crestline Assurance", "Halcyon Reinsurance"),
    ("Ironwood Casualty", "Summit Peak Re"),
    ("Harborview Insurance", "Greywacke Re"),
    ("Redwood Agricultural Mutual", "Continental Shelf Re"),
    ("Pinnacle Health Assurance", "Windward Re"),
    ("Beacon Surety Company", "Orion Global Re"),
    ("Silverbirch Insurance", "Cobalt Reinsurance"),
    ("Fairbanks Energy Underwriters", "Meltwater Re"),
    ("Kestrel Specialty Lines", "Highland Cross Re"),
    ("Oakfield Insurance Company", "Trident Atlantic Re"),
    ("Compass Rose Underwriting", "Sable Island Re"),
    ("Millbrook Mutual", "Aster Ridge Re"),
    ("Granite State Casualty", "Longford Re"),
    ("Seaboard Equine Insurers", "Cloudbreak Re"),
];

const NAME_VARIATIONS: [&str; 8] = [
    "",
    " II",
    " 2025",
    " Renewal",
    " Series B",
    " Excess Layer",
    " Pro Rata",
    " Global",
];

/// Records generated before the cap is applied are never observable;
/// the dataset is exactly the first `DATASET_CAP` combinations.
const DATASET_CAP: usize = 25;

fn build_dataset() -> Vec<Transaction> {
    let mut out = Vec::with_capacity(DATASET_CAP);
    'outer: for (v_idx, variation) in NAME_VARIATIONS.iter().enumerate() {
        for (p_idx, program) in PROGRAMS.iter().enumerate() {
            if out.len() >= DATASET_CAP {
                break 'outer;
            }
            let idx = out.len();
            let (ceding, reinsurer) = COMPANY_PAIRS[(p_idx + v_idx) % COMPANY_PAIRS.len()];
            let (y, m, d) = program.effective;
            let effective_date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
            let expiry_date = NaiveDate::from_ymd_opt(y + 1, m, d).unwrap_or_default();
            let premium = program.gross_earned_premium * program.quota_share / 100.0;
            let created_at =
                DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(19_700 + idx as i64);
            let mut noise = StdRng::seed_from_u64(0xB0DE + idx as u64);
            out.push(Transaction {
                id: format!("txn-{:03}", idx + 1),
                program_id: format!("prog-{:02}", p_idx + 1),
                name: format!("{}{}", program.name, variation),
                ceding_company: ceding.to_string(),
                reinsurer: reinsurer.to_string(),
                effective_date,
                expiry_date,
                gross_earned_premium: program.gross_earned_premium,
                quota_share: program.quota_share,
                premium,
                status: program.status,
                kind: program.kind,
                subject_business: program.subject_business.to_string(),
                contract_count: noise.gen_range(1..=12),
                created_at,
                updated_at: created_at,
            });
        }
    }
    out
}

/// Synchronous query surface over the fixed sample dataset.
pub struct TransactionProvider {
    transactions: Vec<Transaction>,
}

impl TransactionProvider {
    pub fn new() -> Self {
        Self { transactions: build_dataset() }
    }

    /// Filtered, paginated listing. No filter combination errors; an
    /// unmatched filter yields an empty page with `total: 0`.
    pub fn list(&self, filter: &TransactionFilter) -> TransactionPage {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let matched: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| match &needle {
                Some(n) => {
                    t.name.to_lowercase().contains(n)
                        || t.ceding_company.to_lowercase().contains(n)
                        || t.reinsurer.to_lowercase().contains(n)
                }
                None => true,
            })
            .filter(|t| match &filter.status {
                Some(set) => set.contains(&t.status),
                None => true,
            })
            .collect();
        let total = matched.len();
        let items: Vec<Transaction> = matched
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        TransactionPage {
            items,
            pagination: Pagination { total, limit: filter.limit, offset: filter.offset },
        }
    }

    /// Aggregates over the full dataset, ignoring any filter.
    pub fn stats(&self) -> TransactionStats {
        TransactionStats::from_records(&self.transactions)
    }
}

impl Default for TransactionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_is_capped_and_stable() {
        let a = TransactionProvider::new();
        let b = TransactionProvider::new();
        assert_eq!(a.transactions.len(), DATASET_CAP);
        assert_eq!(a.transactions, b.transactions);
    }

    #[test]
    fn premium_is_derived_from_quota_share() {
        let provider = TransactionProvider::new();
        for t in &provider.transactions {
            assert_eq!(t.premium, t.gross_earned_premium * t.quota_share / 100.0);
        }
    }

    #[test]
    fn stats_match_unfiltered_listing() {
        let provider = TransactionProvider::new();
        let stats = provider.stats();
        let page = provider.list(&TransactionFilter::default());
        assert_eq!(stats.total, page.items.len());
        assert_eq!(
            stats.active + stats.pending + stats.draft + stats.cancelled,
            stats.total
        );
        let sum: f64 = page.items.iter().map(|t| t.premium).sum();
        assert_eq!(stats.total_premium, sum);
    }

    #[test]
    fn empty_set_average_is_zero() {
        let stats = TransactionStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_premium, 0.0);
        assert!(!stats.average_premium.is_nan());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let provider = TransactionProvider::new();
        let page = provider.list(&TransactionFilter {
            search: Some("MERIDIAN".to_string()),
            ..Default::default()
        });
        assert!(!page.items.is_empty());
        for t in &page.items {
            assert!(t.reinsurer.to_lowercase().contains("meridian"));
        }
    }

    #[test]
    fn unmatched_search_yields_empty_page() {
        let provider = TransactionProvider::new();
        let page = provider.list(&TransactionFilter {
            search: Some("zzz-no-match".to_string()),
            ..Default::default()
        });
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
    }

    #[test]
    fn status_filter_is_set_membership() {
        let provider = TransactionProvider::new();
        let page = provider.list(&TransactionFilter {
            status: Some(vec![TransactionStatus::Draft, TransactionStatus::Cancelled]),
            ..Default::default()
        });
        assert!(!page.items.is_empty());
        for t in &page.items {
            assert!(matches!(
                t.status,
                TransactionStatus::Draft | TransactionStatus::Cancelled
            ));
        }
        // Empty status set matches nothing, without erroring.
        let page = provider.list(&TransactionFilter {
            status: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(page.pagination.total, 0);
    }

    #[test]
    fn pagination_slices_after_filtering() {
        let provider = TransactionProvider::new();
        let page = provider.list(&TransactionFilter {
            limit: Some(10),
            offset: 20,
            ..Default::default()
        });
        assert_eq!(page.pagination.total, DATASET_CAP);
        assert_eq!(page.items.len(), DATASET_CAP - 20);
        // Offset past the end is an empty page, not an error.
        let page = provider.list(&TransactionFilter {
            offset: 1_000,
            ..Default::default()
        });
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, DATASET_CAP);
    }
}
