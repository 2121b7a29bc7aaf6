pub mod address;
pub mod format;
pub mod report;
pub mod rugcheck;
pub mod scanner;

pub use address::{AddressError, TokenAddress};
pub use report::{render_report, OutputFormat};
pub use rugcheck::{RawSummary, ReportSource, RugCheckClient, ScanSettings};
pub use scanner::{
    fixture_source::FixtureSource, normalize::normalize_report, token_scanner::TokenScanner,
    ExternalLink, HolderKind, HolderRow, LaunchPlatform, MarketRow, RiskFlag, RiskLevel,
    RiskThresholds, ScanStage, TokenReport,
};
