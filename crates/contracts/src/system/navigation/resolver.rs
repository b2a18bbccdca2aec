//! Prunes a navigation template for one user and company.
//!
//! The template is only read; every call returns a freshly built tree, so a
//! shared template can be resolved for any number of users.

use super::rules::{self, Decision};
use super::{NavKey, NavSection, NavigationNode, NavigationTree};
use crate::system::access::{CompanyFlags, DashboardMode, UserProfile};

/// Returns `None` until both the tree and the user are known. Callers must
/// treat `None` as "not ready" rather than as an empty menu.
///
/// A missing company is evaluated as `CompanyFlags::default()`.
pub fn resolve(
    tree: Option<&NavigationTree>,
    user: Option<&UserProfile>,
    company: Option<&CompanyFlags>,
) -> Option<NavigationTree> {
    let tree = tree?;
    let user = user?;
    let company = company.copied().unwrap_or_default();

    let sections = tree
        .sections
        .iter()
        .filter_map(|section| {
            let items: Vec<NavigationNode> = section
                .items
                .iter()
                .filter_map(|item| resolve_node(tree.mode, item, user, &company))
                .collect();
            (!items.is_empty()).then(|| NavSection {
                key: section.key,
                subheader: section.subheader.clone(),
                items,
            })
        })
        .collect();

    Some(NavigationTree {
        mode: tree.mode,
        locale: tree.locale,
        sections,
    })
}

/// Per-node decisions for every node in the template, parents first.
/// Children of a denied parent are still listed with their own decision.
pub fn explain(
    tree: &NavigationTree,
    user: &UserProfile,
    company: Option<&CompanyFlags>,
) -> Vec<(NavKey, Decision)> {
    let company = company.copied().unwrap_or_default();
    tree.nodes()
        .map(|node| (node.key, decide(tree.mode, node.key, user, &company)))
        .collect()
}

fn decide(mode: DashboardMode, key: NavKey, user: &UserProfile, company: &CompanyFlags) -> Decision {
    match rules::rule_for(mode, key) {
        Some(rule) => rules::evaluate(rule, user, company),
        None => Decision::Visible,
    }
}

fn resolve_node(
    mode: DashboardMode,
    node: &NavigationNode,
    user: &UserProfile,
    company: &CompanyFlags,
) -> Option<NavigationNode> {
    if !decide(mode, node.key, user, company).is_visible() {
        return None;
    }

    let children: Vec<NavigationNode> = node
        .children
        .iter()
        .filter_map(|child| resolve_node(mode, child, user, company))
        .collect();

    // A grouping entry with nothing left to open is dropped.
    if node.is_parent_only() && !node.children.is_empty() && children.is_empty() {
        return None;
    }

    Some(NavigationNode {
        key: node.key,
        title: node.title.clone(),
        path: node.path.clone(),
        icon: node.icon,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::access::AccessMap;
    use crate::system::navigation::rules::DenyReason;
    use crate::system::navigation::tree::{build_template, template};
    use crate::system::navigation::{Locale, NavIcon, SectionKey};

    fn staff() -> NavigationTree {
        build_template(DashboardMode::Staff, Locale::En)
    }

    fn user_with(acc: Option<AccessMap>) -> UserProfile {
        UserProfile {
            id: "7".into(),
            username: "desk".into(),
            acc,
            ..Default::default()
        }
    }

    fn wallet_betting() -> CompanyFlags {
        CompanyFlags {
            company_type: 2,
            company_wallet_system: true,
        }
    }

    #[test]
    fn not_ready_without_tree_or_user() {
        let tree = staff();
        let user = user_with(None);
        assert!(resolve(None, Some(&user), None).is_none());
        assert!(resolve(Some(&tree), None, None).is_none());
        assert!(resolve(Some(&tree), Some(&user), None).is_some());
    }

    #[test]
    fn default_allow_entries_survive_without_access_map() {
        let tree = staff();
        let out = resolve(Some(&tree), Some(&user_with(None)), None).unwrap();
        for key in [
            NavKey::Dashboard,
            NavKey::Customers,
            NavKey::Leads,
            NavKey::Deposits,
            NavKey::RiskPositions,
            NavKey::KycDocuments,
            NavKey::SalesReport,
            NavKey::Settings,
            NavKey::Profile,
        ] {
            assert!(out.contains(key), "{key:?} should be visible");
        }
    }

    #[test]
    fn default_deny_entries_need_an_explicit_flag() {
        let tree = staff();
        let out = resolve(Some(&tree), Some(&user_with(Some(AccessMap::new()))), None).unwrap();
        for key in [
            NavKey::Logs,
            NavKey::Integration,
            NavKey::AiQuestions,
            NavKey::RegulationAudit,
            NavKey::IbRoom,
        ] {
            assert!(!out.contains(key), "{key:?} should be hidden");
        }

        let granted = AccessMap::new()
            .with("acc_v_logs", true)
            .with("acc_v_integration", true)
            .with("acc_v_ai_questions", true)
            .with("acc_v_compliance", true)
            .with("acc_v_regulation_audit", true)
            .with("acc_v_ib_room", true);
        let out = resolve(Some(&tree), Some(&user_with(Some(granted))), None).unwrap();
        for key in [
            NavKey::Logs,
            NavKey::Integration,
            NavKey::AiQuestions,
            NavKey::RegulationAudit,
            NavKey::IbRoom,
        ] {
            assert!(out.contains(key), "{key:?} should be visible");
        }
    }

    #[test]
    fn affiliate_user_loses_staff_only_entries() {
        let tree = staff();
        let mut user = user_with(Some(
            AccessMap::new()
                .with("acc_v_settings", true)
                .with("acc_v_integration", true)
                .with("acc_v_risk", true),
        ));
        user.affiliate = true;
        let out = resolve(Some(&tree), Some(&user), Some(&wallet_betting())).unwrap();
        assert!(!out.contains(NavKey::Settings));
        assert!(!out.contains(NavKey::Integration));
        assert!(!out.contains(NavKey::Risk));
        assert!(!out.contains(NavKey::RiskBets));
        assert!(out.contains(NavKey::Customers));
    }

    #[test]
    fn betting_company_swaps_positions_for_bets() {
        let tree = staff();
        let user = user_with(Some(AccessMap::new()));

        let out = resolve(Some(&tree), Some(&user), Some(&wallet_betting())).unwrap();
        assert!(!out.contains(NavKey::RiskPositions));
        assert!(out.contains(NavKey::RiskBets));

        let blocked = user_with(Some(AccessMap::new().with("acc_v_risk_bets", false)));
        let out = resolve(Some(&tree), Some(&blocked), Some(&wallet_betting())).unwrap();
        assert!(!out.contains(NavKey::RiskBets));

        let trading = CompanyFlags {
            company_type: 1,
            company_wallet_system: true,
        };
        let out = resolve(Some(&tree), Some(&user), Some(&trading)).unwrap();
        assert!(out.contains(NavKey::RiskPositions));
        assert!(!out.contains(NavKey::RiskBets));
    }

    #[test]
    fn wallet_transactions_follow_company_wallet_system() {
        let tree = staff();
        let user = user_with(Some(AccessMap::new().with("acc_v_wallet_transactions", true)));
        let no_wallet = CompanyFlags {
            company_type: 1,
            company_wallet_system: false,
        };
        let out = resolve(Some(&tree), Some(&user), Some(&no_wallet)).unwrap();
        assert!(!out.contains(NavKey::WalletTransactions));
        assert!(out.contains(NavKey::Deposits));

        let out = resolve(Some(&tree), Some(&user), None).unwrap();
        assert!(!out.contains(NavKey::WalletTransactions));
    }

    #[test]
    fn customers_flag_examples() {
        let tree = staff();
        let denied = user_with(Some(AccessMap::new().with("acc_v_client", false)));
        let out = resolve(Some(&tree), Some(&denied), None).unwrap();
        assert!(!out.contains(NavKey::Customers));

        let absent = user_with(Some(AccessMap::new()));
        let out = resolve(Some(&tree), Some(&absent), None).unwrap();
        assert!(out.contains(NavKey::Customers));
    }

    #[test]
    fn affiliate_override_beats_settings_flag() {
        let tree = staff();
        let mut user = user_with(Some(AccessMap::new().with("acc_v_settings", true)));
        user.affiliate = true;
        let out = resolve(Some(&tree), Some(&user), None).unwrap();
        assert!(!out.contains(NavKey::Settings));
    }

    #[test]
    fn resolution_is_idempotent_and_leaves_template_alone() {
        let shared = template(DashboardMode::Staff, Locale::En);
        let before = (*shared).clone();
        let user = user_with(Some(AccessMap::new().with("acc_v_deposits", false)));

        let first = resolve(Some(&*shared), Some(&user), None).unwrap();
        let second = resolve(Some(&*shared), Some(&user), None).unwrap();
        assert_eq!(first, second);
        assert_eq!(*shared, before);

        // A different user resolving afterwards sees the untouched template.
        let other = resolve(Some(&*shared), Some(&user_with(None)), None).unwrap();
        assert!(other.contains(NavKey::Deposits));
    }

    #[test]
    fn parent_without_surviving_children_is_removed() {
        let tree = staff();
        let acc = AccessMap::new()
            .with("acc_v_report_sales", false)
            .with("acc_v_report_affiliates", false)
            .with("acc_v_report_retention", false)
            .with("acc_v_report_calls", false)
            .with("acc_v_report_payments", false);
        let out = resolve(Some(&tree), Some(&user_with(Some(acc))), None).unwrap();
        assert!(!out.contains(NavKey::Reports));
        assert!(out.sections.iter().all(|s| s.key != SectionKey::Reports));
    }

    #[test]
    fn kyc_documents_do_not_depend_on_the_audit_flag() {
        let tree = staff();
        let granted = AccessMap::new().with("acc_v_kyc_documents", true);
        for acc in [None, Some(AccessMap::new()), Some(granted)] {
            let out = resolve(Some(&tree), Some(&user_with(acc.clone())), None).unwrap();
            assert!(out.contains(NavKey::KycDocuments), "acc = {acc:?}");
            assert!(out.contains(NavKey::Compliance), "acc = {acc:?}");
            assert!(!out.contains(NavKey::RegulationAudit), "acc = {acc:?}");
        }

        let no_kyc = AccessMap::new().with("acc_v_kyc_documents", false);
        let out = resolve(Some(&tree), Some(&user_with(Some(no_kyc))), None).unwrap();
        assert!(!out.contains(NavKey::Compliance));
    }

    #[test]
    fn denied_parent_removes_its_children() {
        let tree = staff();
        let acc = AccessMap::new().with("acc_v_payments", false);
        let out = resolve(Some(&tree), Some(&user_with(Some(acc))), None).unwrap();
        assert!(!out.contains(NavKey::Payments));
        assert!(!out.contains(NavKey::Deposits));
    }

    #[test]
    fn unknown_entries_pass_through() {
        let mut tree = build_template(DashboardMode::Affiliate, Locale::En);
        // Staff-only keys have no rule in the affiliate table.
        tree.sections[0].items.push(NavigationNode {
            key: NavKey::Logs,
            title: "Logs".into(),
            path: "/affiliate/logs".into(),
            icon: NavIcon::Logs,
            children: Vec::new(),
        });
        let out = resolve(Some(&tree), Some(&user_with(None)), None).unwrap();
        assert!(out.contains(NavKey::Logs));
    }

    #[test]
    fn affiliate_tree_uses_its_own_rules() {
        let tree = build_template(DashboardMode::Affiliate, Locale::En);
        let mut user = user_with(Some(AccessMap::new().with("acc_v_commissions", false)));
        user.affiliate = true;
        let out = resolve(Some(&tree), Some(&user), None).unwrap();
        assert!(out.contains(NavKey::MyCustomers));
        assert!(!out.contains(NavKey::Commissions));
        assert!(!out.contains(NavKey::IbRoom));
        assert!(out.contains(NavKey::Profile));
    }

    #[test]
    fn resolution_does_not_depend_on_locale() {
        let acc = AccessMap::new()
            .with("acc_v_client", false)
            .with("acc_v_logs", true);
        let user = user_with(Some(acc));
        let keys: Vec<Vec<NavKey>> = Locale::ALL
            .iter()
            .map(|locale| {
                let tree = build_template(DashboardMode::Staff, *locale);
                resolve(Some(&tree), Some(&user), None).unwrap().keys()
            })
            .collect();
        assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn explain_reports_reasons() {
        let tree = staff();
        let decisions = explain(&tree, &user_with(None), None);
        assert_eq!(decisions.len(), tree.nodes().count());
        let logs = decisions.iter().find(|(key, _)| *key == NavKey::Logs).unwrap();
        assert_eq!(
            logs.1,
            Decision::Denied(DenyReason::DefaultDeny {
                flag: "acc_v_logs".into()
            })
        );
        let wallet = decisions
            .iter()
            .find(|(key, _)| *key == NavKey::WalletTransactions)
            .unwrap();
        assert_eq!(wallet.1, Decision::Denied(DenyReason::WalletSystemDisabled));
    }
}
