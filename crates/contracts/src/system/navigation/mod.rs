//! Dashboard navigation: static templates per mode, the rule table that
//! decides visibility, and the resolver that prunes a template for one user.
//!
//! Nodes carry a stable [`NavKey`]; translated titles are display-only and
//! never take part in access decisions.

pub mod i18n;
pub mod resolver;
pub mod rules;
pub mod tree;

use serde::{Deserialize, Serialize};

use super::access::DashboardMode;
pub use i18n::Locale;

/// Path used by parent-only entries that exist to group children.
pub const PARENT_PATH: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    Dashboard,
    Customers,
    Leads,
    Affiliates,
    Tasks,
    Calendar,
    Chat,
    Payments,
    Deposits,
    Withdrawals,
    WalletTransactions,
    PaymentAudit,
    Risk,
    RiskOverview,
    RiskPositions,
    RiskBets,
    RiskExposure,
    RiskAudit,
    Compliance,
    RegulationAudit,
    KycDocuments,
    Reports,
    SalesReport,
    AffiliateReport,
    RetentionReport,
    CallReport,
    PaymentReport,
    Announcements,
    WhatsApp,
    AiQuestions,
    IbRoom,
    StaffUsers,
    Teams,
    Logs,
    Integration,
    Settings,
    Profile,
    MyCustomers,
    MyLeads,
    Commissions,
    SubAffiliates,
    MarketingLinks,
    Payouts,
    ConversionReport,
    EarningsReport,
}

impl NavKey {
    pub const ALL: &'static [NavKey] = &[
        NavKey::Dashboard,
        NavKey::Customers,
        NavKey::Leads,
        NavKey::Affiliates,
        NavKey::Tasks,
        NavKey::Calendar,
        NavKey::Chat,
        NavKey::Payments,
        NavKey::Deposits,
        NavKey::Withdrawals,
        NavKey::WalletTransactions,
        NavKey::PaymentAudit,
        NavKey::Risk,
        NavKey::RiskOverview,
        NavKey::RiskPositions,
        NavKey::RiskBets,
        NavKey::RiskExposure,
        NavKey::RiskAudit,
        NavKey::Compliance,
        NavKey::RegulationAudit,
        NavKey::KycDocuments,
        NavKey::Reports,
        NavKey::SalesReport,
        NavKey::AffiliateReport,
        NavKey::RetentionReport,
        NavKey::CallReport,
        NavKey::PaymentReport,
        NavKey::Announcements,
        NavKey::WhatsApp,
        NavKey::AiQuestions,
        NavKey::IbRoom,
        NavKey::StaffUsers,
        NavKey::Teams,
        NavKey::Logs,
        NavKey::Integration,
        NavKey::Settings,
        NavKey::Profile,
        NavKey::MyCustomers,
        NavKey::MyLeads,
        NavKey::Commissions,
        NavKey::SubAffiliates,
        NavKey::MarketingLinks,
        NavKey::Payouts,
        NavKey::ConversionReport,
        NavKey::EarningsReport,
    ];

    /// Stable identifier, also used as the tab key in the frontend.
    pub fn as_str(self) -> &'static str {
        match self {
            NavKey::Dashboard => "dashboard",
            NavKey::Customers => "customers",
            NavKey::Leads => "leads",
            NavKey::Affiliates => "affiliates",
            NavKey::Tasks => "tasks",
            NavKey::Calendar => "calendar",
            NavKey::Chat => "chat",
            NavKey::Payments => "payments",
            NavKey::Deposits => "deposits",
            NavKey::Withdrawals => "withdrawals",
            NavKey::WalletTransactions => "wallet_transactions",
            NavKey::PaymentAudit => "payment_audit",
            NavKey::Risk => "risk",
            NavKey::RiskOverview => "risk_overview",
            NavKey::RiskPositions => "risk_positions",
            NavKey::RiskBets => "risk_bets",
            NavKey::RiskExposure => "risk_exposure",
            NavKey::RiskAudit => "risk_audit",
            NavKey::Compliance => "compliance",
            NavKey::RegulationAudit => "regulation_audit",
            NavKey::KycDocuments => "kyc_documents",
            NavKey::Reports => "reports",
            NavKey::SalesReport => "sales_report",
            NavKey::AffiliateReport => "affiliate_report",
            NavKey::RetentionReport => "retention_report",
            NavKey::CallReport => "call_report",
            NavKey::PaymentReport => "payment_report",
            NavKey::Announcements => "announcements",
            NavKey::WhatsApp => "whats_app",
            NavKey::AiQuestions => "ai_questions",
            NavKey::IbRoom => "ib_room",
            NavKey::StaffUsers => "staff_users",
            NavKey::Teams => "teams",
            NavKey::Logs => "logs",
            NavKey::Integration => "integration",
            NavKey::Settings => "settings",
            NavKey::Profile => "profile",
            NavKey::MyCustomers => "my_customers",
            NavKey::MyLeads => "my_leads",
            NavKey::Commissions => "commissions",
            NavKey::SubAffiliates => "sub_affiliates",
            NavKey::MarketingLinks => "marketing_links",
            NavKey::Payouts => "payouts",
            NavKey::ConversionReport => "conversion_report",
            NavKey::EarningsReport => "earnings_report",
        }
    }

    pub fn parse(value: &str) -> Option<NavKey> {
        NavKey::ALL.iter().copied().find(|key| key.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    General,
    Finance,
    Reports,
    Communication,
    Administration,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIcon {
    Dashboard,
    Customers,
    Leads,
    Affiliates,
    Tasks,
    Calendar,
    Chat,
    Payments,
    Wallet,
    Risk,
    Compliance,
    Reports,
    Announcements,
    WhatsApp,
    Ai,
    IbRoom,
    Users,
    Teams,
    Logs,
    Integration,
    Settings,
    Profile,
    Commissions,
    Links,
    Payouts,
}

impl NavIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            NavIcon::Dashboard => "dashboard",
            NavIcon::Customers => "customers",
            NavIcon::Leads => "leads",
            NavIcon::Affiliates => "affiliates",
            NavIcon::Tasks => "tasks",
            NavIcon::Calendar => "calendar",
            NavIcon::Chat => "chat",
            NavIcon::Payments => "payments",
            NavIcon::Wallet => "wallet",
            NavIcon::Risk => "risk",
            NavIcon::Compliance => "compliance",
            NavIcon::Reports => "reports",
            NavIcon::Announcements => "announcements",
            NavIcon::WhatsApp => "whats_app",
            NavIcon::Ai => "ai",
            NavIcon::IbRoom => "ib_room",
            NavIcon::Users => "users",
            NavIcon::Teams => "teams",
            NavIcon::Logs => "logs",
            NavIcon::Integration => "integration",
            NavIcon::Settings => "settings",
            NavIcon::Profile => "profile",
            NavIcon::Commissions => "commissions",
            NavIcon::Links => "links",
            NavIcon::Payouts => "payouts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    pub key: NavKey,
    pub title: String,
    pub path: String,
    pub icon: NavIcon,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Parent-only entries group children and have no page of their own.
    pub fn is_parent_only(&self) -> bool {
        self.path == PARENT_PATH || self.path.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub key: SectionKey,
    pub subheader: String,
    pub items: Vec<NavigationNode>,
}

/// A navigation tree for one mode and locale. Templates and resolved trees
/// share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTree {
    pub mode: DashboardMode,
    pub locale: Locale,
    pub sections: Vec<NavSection>,
}

impl NavigationTree {
    /// Depth-first walk over every node (parents before their children).
    pub fn nodes(&self) -> impl Iterator<Item = &NavigationNode> {
        self.sections.iter().flat_map(|section| {
            section
                .items
                .iter()
                .flat_map(|item| std::iter::once(item).chain(item.children.iter()))
        })
    }

    pub fn contains(&self, key: NavKey) -> bool {
        self.nodes().any(|node| node.key == key)
    }

    pub fn find(&self, key: NavKey) -> Option<&NavigationNode> {
        self.nodes().find(|node| node.key == key)
    }

    pub fn keys(&self) -> Vec<NavKey> {
        self.nodes().map(|node| node.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strings_round_trip_and_match_serde() {
        for key in NavKey::ALL {
            assert_eq!(NavKey::parse(key.as_str()), Some(*key));
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert_eq!(NavKey::parse("no_such_page"), None);
    }

    #[test]
    fn icon_strings_match_serde() {
        for icon in [NavIcon::WhatsApp, NavIcon::IbRoom, NavIcon::Dashboard] {
            let json = serde_json::to_string(&icon).unwrap();
            assert_eq!(json, format!("\"{}\"", icon.as_str()));
        }
    }
}
