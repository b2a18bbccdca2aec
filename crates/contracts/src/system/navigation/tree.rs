//! Static navigation templates.
//!
//! One template per `(DashboardMode, Locale)`. Templates are built once and
//! shared behind an `Arc`; nothing downstream is allowed to mutate them.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::i18n::{self, Locale};
use super::{NavIcon, NavKey, NavSection, NavigationNode, NavigationTree, SectionKey, PARENT_PATH};
use crate::system::access::DashboardMode;

static TEMPLATES: Lazy<RwLock<HashMap<(DashboardMode, Locale), Arc<NavigationTree>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Memoized template for a mode and locale.
pub fn template(mode: DashboardMode, locale: Locale) -> Arc<NavigationTree> {
    if let Ok(cache) = TEMPLATES.read() {
        if let Some(tree) = cache.get(&(mode, locale)) {
            return Arc::clone(tree);
        }
    }

    let tree = Arc::new(build_template(mode, locale));
    match TEMPLATES.write() {
        Ok(mut cache) => Arc::clone(cache.entry((mode, locale)).or_insert(tree)),
        Err(_) => tree,
    }
}

/// Build a fresh template. Prefer [`template`] outside of tests.
pub fn build_template(mode: DashboardMode, locale: Locale) -> NavigationTree {
    let sections = match mode {
        DashboardMode::Staff => staff_sections(locale),
        DashboardMode::Affiliate => affiliate_sections(locale),
    };
    NavigationTree {
        mode,
        locale,
        sections,
    }
}

fn staff_sections(locale: Locale) -> Vec<NavSection> {
    let b = Builder::new(locale, "/dashboard");
    vec![
        b.section(
            SectionKey::General,
            vec![
                b.leaf(NavKey::Dashboard, "app", NavIcon::Dashboard),
                b.leaf(NavKey::Customers, "customers", NavIcon::Customers),
                b.leaf(NavKey::Leads, "leads", NavIcon::Leads),
                b.leaf(NavKey::Affiliates, "affiliates", NavIcon::Affiliates),
                b.leaf(NavKey::Tasks, "tasks", NavIcon::Tasks),
                b.leaf(NavKey::Calendar, "calendar", NavIcon::Calendar),
                b.leaf(NavKey::Chat, "chat", NavIcon::Chat),
            ],
        ),
        b.section(
            SectionKey::Finance,
            vec![
                b.parent(
                    NavKey::Payments,
                    NavIcon::Payments,
                    vec![
                        b.leaf(NavKey::Deposits, "payments/deposits", NavIcon::Payments),
                        b.leaf(NavKey::Withdrawals, "payments/withdrawals", NavIcon::Payments),
                        b.leaf(NavKey::WalletTransactions, "payments/wallet", NavIcon::Wallet),
                        b.leaf(NavKey::PaymentAudit, "payments/audit", NavIcon::Payments),
                    ],
                ),
                b.parent(
                    NavKey::Risk,
                    NavIcon::Risk,
                    vec![
                        b.leaf(NavKey::RiskOverview, "risk/overview", NavIcon::Risk),
                        b.leaf(NavKey::RiskPositions, "risk/positions", NavIcon::Risk),
                        b.leaf(NavKey::RiskBets, "risk/bets", NavIcon::Risk),
                        b.leaf(NavKey::RiskExposure, "risk/exposure", NavIcon::Risk),
                        b.leaf(NavKey::RiskAudit, "risk/audit", NavIcon::Risk),
                    ],
                ),
                b.parent(
                    NavKey::Compliance,
                    NavIcon::Compliance,
                    vec![
                        b.leaf(NavKey::RegulationAudit, "compliance/audit", NavIcon::Compliance),
                        b.leaf(NavKey::KycDocuments, "compliance/kyc", NavIcon::Compliance),
                    ],
                ),
            ],
        ),
        b.section(
            SectionKey::Reports,
            vec![b.parent(
                NavKey::Reports,
                NavIcon::Reports,
                vec![
                    b.leaf(NavKey::SalesReport, "reports/sales", NavIcon::Reports),
                    b.leaf(NavKey::AffiliateReport, "reports/affiliates", NavIcon::Reports),
                    b.leaf(NavKey::RetentionReport, "reports/retention", NavIcon::Reports),
                    b.leaf(NavKey::CallReport, "reports/calls", NavIcon::Reports),
                    b.leaf(NavKey::PaymentReport, "reports/payments", NavIcon::Reports),
                ],
            )],
        ),
        b.section(
            SectionKey::Communication,
            vec![
                b.leaf(NavKey::Announcements, "announcements", NavIcon::Announcements),
                b.leaf(NavKey::WhatsApp, "whatsapp", NavIcon::WhatsApp),
                b.leaf(NavKey::AiQuestions, "ai-questions", NavIcon::Ai),
                b.leaf(NavKey::IbRoom, "ib-room", NavIcon::IbRoom),
            ],
        ),
        b.section(
            SectionKey::Administration,
            vec![
                b.leaf(NavKey::StaffUsers, "staff", NavIcon::Users),
                b.leaf(NavKey::Teams, "teams", NavIcon::Teams),
                b.leaf(NavKey::Logs, "logs", NavIcon::Logs),
                b.leaf(NavKey::Integration, "integration", NavIcon::Integration),
                b.leaf(NavKey::Settings, "settings", NavIcon::Settings),
                b.leaf(NavKey::Profile, "profile", NavIcon::Profile),
            ],
        ),
    ]
}

fn affiliate_sections(locale: Locale) -> Vec<NavSection> {
    let b = Builder::new(locale, "/affiliate");
    vec![
        b.section(
            SectionKey::General,
            vec![
                b.leaf(NavKey::Dashboard, "app", NavIcon::Dashboard),
                b.leaf(NavKey::MyCustomers, "customers", NavIcon::Customers),
                b.leaf(NavKey::MyLeads, "leads", NavIcon::Leads),
                b.leaf(NavKey::Commissions, "commissions", NavIcon::Commissions),
                b.leaf(NavKey::SubAffiliates, "sub-affiliates", NavIcon::Affiliates),
                b.leaf(NavKey::MarketingLinks, "links", NavIcon::Links),
                b.leaf(NavKey::Payouts, "payouts", NavIcon::Payouts),
            ],
        ),
        b.section(
            SectionKey::Reports,
            vec![b.parent(
                NavKey::Reports,
                NavIcon::Reports,
                vec![
                    b.leaf(NavKey::ConversionReport, "reports/conversion", NavIcon::Reports),
                    b.leaf(NavKey::EarningsReport, "reports/earnings", NavIcon::Reports),
                ],
            )],
        ),
        b.section(
            SectionKey::Support,
            vec![
                b.leaf(NavKey::Chat, "chat", NavIcon::Chat),
                b.leaf(NavKey::IbRoom, "ib-room", NavIcon::IbRoom),
                b.leaf(NavKey::Profile, "profile", NavIcon::Profile),
            ],
        ),
    ]
}

struct Builder {
    locale: Locale,
    root: &'static str,
}

impl Builder {
    fn new(locale: Locale, root: &'static str) -> Self {
        Self { locale, root }
    }

    fn section(&self, key: SectionKey, items: Vec<NavigationNode>) -> NavSection {
        NavSection {
            key,
            subheader: i18n::subheader(key, self.locale).to_string(),
            items,
        }
    }

    fn leaf(&self, key: NavKey, path: &str, icon: NavIcon) -> NavigationNode {
        NavigationNode {
            key,
            title: i18n::title(key, self.locale).to_string(),
            path: format!("{}/{}", self.root, path),
            icon,
            children: Vec::new(),
        }
    }

    fn parent(&self, key: NavKey, icon: NavIcon, children: Vec<NavigationNode>) -> NavigationNode {
        NavigationNode {
            key,
            title: i18n::title(key, self.locale).to_string(),
            path: PARENT_PATH.to_string(),
            icon,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn template_is_memoized_per_mode_and_locale() {
        let first = template(DashboardMode::Staff, Locale::En);
        let second = template(DashboardMode::Staff, Locale::En);
        assert!(Arc::ptr_eq(&first, &second));

        let russian = template(DashboardMode::Staff, Locale::Ru);
        assert!(!Arc::ptr_eq(&first, &russian));
        assert_eq!(first.keys(), russian.keys());
        assert_ne!(
            first.find(NavKey::Customers).map(|n| n.title.clone()),
            russian.find(NavKey::Customers).map(|n| n.title.clone())
        );
    }

    #[test]
    fn keys_are_unique_within_a_template() {
        for mode in [DashboardMode::Staff, DashboardMode::Affiliate] {
            let tree = build_template(mode, Locale::En);
            let keys = tree.keys();
            let unique: HashSet<_> = keys.iter().collect();
            assert_eq!(keys.len(), unique.len(), "duplicate key in {mode:?}");
        }
    }

    #[test]
    fn only_one_level_of_nesting() {
        for mode in [DashboardMode::Staff, DashboardMode::Affiliate] {
            let tree = build_template(mode, Locale::En);
            for section in &tree.sections {
                for item in &section.items {
                    assert_eq!(item.is_parent_only(), !item.children.is_empty());
                    assert!(item.children.iter().all(|child| child.children.is_empty()));
                }
            }
        }
    }

    #[test]
    fn affiliate_tree_is_reduced() {
        let affiliate = build_template(DashboardMode::Affiliate, Locale::En);
        assert!(affiliate.contains(NavKey::MyCustomers));
        assert!(!affiliate.contains(NavKey::Settings));
        assert!(!affiliate.contains(NavKey::Risk));
        assert!(affiliate.nodes().all(|node| node.is_parent_only() || node.path.starts_with("/affiliate/")));
    }
}
