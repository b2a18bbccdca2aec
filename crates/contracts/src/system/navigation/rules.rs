//! Declarative visibility rules: one table per dashboard mode.
//!
//! Every rule names the access flag it reads and what an undefined flag
//! means. Gates add conditions that do not depend on the flag at all.
//! A key without a rule is always visible.

use super::NavKey;
use crate::system::access::{CompanyFlags, DashboardMode, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Denied when the acting user is an affiliate.
    StaffOnly,
    /// Denied when the company has this type.
    HiddenForCompanyType(i32),
    /// Denied unless the company has this type.
    OnlyForCompanyType(i32),
    /// Denied unless the company runs the wallet system.
    WalletSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub flag: &'static str,
    pub fallback: Fallback,
    pub gates: &'static [Gate],
}

impl Rule {
    const fn allow(flag: &'static str) -> Self {
        Rule {
            flag,
            fallback: Fallback::Allow,
            gates: &[],
        }
    }

    const fn deny(flag: &'static str) -> Self {
        Rule {
            flag,
            fallback: Fallback::Deny,
            gates: &[],
        }
    }

    const fn gated(self, gates: &'static [Gate]) -> Self {
        Rule { gates, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    AffiliateRestricted,
    CompanyType { company_type: i32 },
    WalletSystemDisabled,
    FlagDenied { flag: String },
    DefaultDeny { flag: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Visible,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_visible(&self) -> bool {
        matches!(self, Decision::Visible)
    }
}

const BETTING: i32 = CompanyFlags::BETTING_TYPE;

static STAFF_RULES: &[(NavKey, Rule)] = &[
    (NavKey::Dashboard, Rule::allow("acc_v_dashboard")),
    (NavKey::Customers, Rule::allow("acc_v_client")),
    (NavKey::Leads, Rule::allow("acc_v_leads")),
    (NavKey::Affiliates, Rule::allow("acc_v_affiliates")),
    (NavKey::Tasks, Rule::allow("acc_v_tasks")),
    (NavKey::Calendar, Rule::allow("acc_v_calendar")),
    (NavKey::Chat, Rule::allow("acc_v_chat")),
    (NavKey::Payments, Rule::allow("acc_v_payments")),
    (NavKey::Deposits, Rule::allow("acc_v_deposits")),
    (NavKey::Withdrawals, Rule::allow("acc_v_withdrawals")),
    (
        NavKey::WalletTransactions,
        Rule::allow("acc_v_wallet_transactions").gated(&[Gate::WalletSystem]),
    ),
    (NavKey::PaymentAudit, Rule::allow("acc_v_payment_audit")),
    (NavKey::Risk, Rule::allow("acc_v_risk").gated(&[Gate::StaffOnly])),
    (NavKey::RiskOverview, Rule::allow("acc_v_risk_overview")),
    (
        NavKey::RiskPositions,
        Rule::allow("acc_v_risk_positions").gated(&[Gate::HiddenForCompanyType(BETTING)]),
    ),
    (
        NavKey::RiskBets,
        Rule::allow("acc_v_risk_bets").gated(&[Gate::OnlyForCompanyType(BETTING)]),
    ),
    (NavKey::RiskExposure, Rule::allow("acc_v_risk_exposure")),
    (NavKey::RiskAudit, Rule::allow("acc_v_risk_audit")),
    (NavKey::Compliance, Rule::allow("acc_v_compliance")),
    (NavKey::RegulationAudit, Rule::deny("acc_v_regulation_audit")),
    (NavKey::KycDocuments, Rule::allow("acc_v_kyc_documents")),
    (NavKey::Reports, Rule::allow("acc_v_reports")),
    (NavKey::SalesReport, Rule::allow("acc_v_report_sales")),
    (NavKey::AffiliateReport, Rule::allow("acc_v_report_affiliates")),
    (NavKey::RetentionReport, Rule::allow("acc_v_report_retention")),
    (NavKey::CallReport, Rule::allow("acc_v_report_calls")),
    (NavKey::PaymentReport, Rule::allow("acc_v_report_payments")),
    (NavKey::Announcements, Rule::allow("acc_v_announcements")),
    (NavKey::WhatsApp, Rule::allow("acc_v_whatsapp")),
    (NavKey::AiQuestions, Rule::deny("acc_v_ai_questions")),
    (NavKey::IbRoom, Rule::deny("acc_v_ib_room")),
    (NavKey::StaffUsers, Rule::allow("acc_v_staff")),
    (NavKey::Teams, Rule::allow("acc_v_teams")),
    (NavKey::Logs, Rule::deny("acc_v_logs")),
    (
        NavKey::Integration,
        Rule::deny("acc_v_integration").gated(&[Gate::StaffOnly]),
    ),
    (NavKey::Settings, Rule::allow("acc_v_settings").gated(&[Gate::StaffOnly])),
];

static AFFILIATE_RULES: &[(NavKey, Rule)] = &[
    (NavKey::Dashboard, Rule::allow("acc_v_dashboard")),
    (NavKey::MyCustomers, Rule::allow("acc_v_client")),
    (NavKey::MyLeads, Rule::allow("acc_v_leads")),
    (NavKey::Commissions, Rule::allow("acc_v_commissions")),
    (NavKey::SubAffiliates, Rule::allow("acc_v_sub_affiliates")),
    (NavKey::MarketingLinks, Rule::allow("acc_v_marketing_links")),
    (NavKey::Payouts, Rule::allow("acc_v_payouts")),
    (NavKey::Reports, Rule::allow("acc_v_reports")),
    (NavKey::ConversionReport, Rule::allow("acc_v_report_conversion")),
    (NavKey::EarningsReport, Rule::allow("acc_v_report_earnings")),
    (NavKey::Chat, Rule::allow("acc_v_chat")),
    (NavKey::IbRoom, Rule::deny("acc_v_ib_room")),
];

pub fn rules(mode: DashboardMode) -> &'static [(NavKey, Rule)] {
    match mode {
        DashboardMode::Staff => STAFF_RULES,
        DashboardMode::Affiliate => AFFILIATE_RULES,
    }
}

pub fn rule_for(mode: DashboardMode, key: NavKey) -> Option<&'static Rule> {
    rules(mode)
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, rule)| rule)
}

/// Evaluate one rule. Gates are conjunctive; the first failing condition is
/// reported, checked as affiliate, then company, then the flag itself.
pub fn evaluate(rule: &Rule, user: &UserProfile, company: &CompanyFlags) -> Decision {
    if user.affiliate && rule.gates.contains(&Gate::StaffOnly) {
        return Decision::Denied(DenyReason::AffiliateRestricted);
    }

    for gate in rule.gates {
        let denied = match *gate {
            Gate::StaffOnly => None,
            Gate::HiddenForCompanyType(kind) if company.company_type == kind => {
                Some(DenyReason::CompanyType { company_type: kind })
            }
            Gate::OnlyForCompanyType(kind) if company.company_type != kind => {
                Some(DenyReason::CompanyType {
                    company_type: company.company_type,
                })
            }
            Gate::WalletSystem if !company.company_wallet_system => {
                Some(DenyReason::WalletSystemDisabled)
            }
            _ => None,
        };
        if let Some(reason) = denied {
            return Decision::Denied(reason);
        }
    }

    match (user.flag(rule.flag), rule.fallback) {
        (Some(true), _) | (None, Fallback::Allow) => Decision::Visible,
        (Some(false), _) => Decision::Denied(DenyReason::FlagDenied {
            flag: rule.flag.to_string(),
        }),
        (None, Fallback::Deny) => Decision::Denied(DenyReason::DefaultDeny {
            flag: rule.flag.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::access::AccessMap;
    use crate::system::navigation::tree::build_template;
    use crate::system::navigation::Locale;

    fn user(acc: AccessMap) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            username: "agent".into(),
            acc: Some(acc),
            ..Default::default()
        }
    }

    #[test]
    fn default_deny_set_is_exact() {
        let denied: Vec<NavKey> = rules(DashboardMode::Staff)
            .iter()
            .filter(|(_, rule)| rule.fallback == Fallback::Deny)
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(
            denied,
            vec![
                NavKey::RegulationAudit,
                NavKey::AiQuestions,
                NavKey::IbRoom,
                NavKey::Logs,
                NavKey::Integration,
            ]
        );
    }

    #[test]
    fn flags_are_unique_per_table() {
        for mode in [DashboardMode::Staff, DashboardMode::Affiliate] {
            let mut flags: Vec<&str> = rules(mode).iter().map(|(_, rule)| rule.flag).collect();
            let total = flags.len();
            flags.sort_unstable();
            flags.dedup();
            assert_eq!(flags.len(), total, "{mode:?}");
        }
    }

    #[test]
    fn every_ruled_key_exists_in_its_template() {
        for mode in [DashboardMode::Staff, DashboardMode::Affiliate] {
            let tree = build_template(mode, Locale::En);
            for (key, _) in rules(mode) {
                assert!(tree.contains(*key), "{key:?} missing from {mode:?} template");
            }
        }
    }

    #[test]
    fn profile_has_no_rule() {
        assert!(rule_for(DashboardMode::Staff, NavKey::Profile).is_none());
        assert!(rule_for(DashboardMode::Affiliate, NavKey::Profile).is_none());
    }

    #[test]
    fn explicit_flag_overrides_fallback() {
        let company = CompanyFlags::default();
        let logs = rule_for(DashboardMode::Staff, NavKey::Logs).unwrap();
        assert_eq!(
            evaluate(logs, &user(AccessMap::new()), &company),
            Decision::Denied(DenyReason::DefaultDeny {
                flag: "acc_v_logs".into()
            })
        );
        assert!(evaluate(logs, &user(AccessMap::new().with("acc_v_logs", true)), &company).is_visible());

        let customers = rule_for(DashboardMode::Staff, NavKey::Customers).unwrap();
        assert_eq!(
            evaluate(customers, &user(AccessMap::new().with("acc_v_client", false)), &company),
            Decision::Denied(DenyReason::FlagDenied {
                flag: "acc_v_client".into()
            })
        );
    }

    #[test]
    fn affiliate_restriction_is_reported_before_company_gates() {
        let rule = Rule::allow("acc_v_x").gated(&[Gate::WalletSystem, Gate::StaffOnly]);
        let mut affiliate = user(AccessMap::new().with("acc_v_x", true));
        affiliate.affiliate = true;
        assert_eq!(
            evaluate(&rule, &affiliate, &CompanyFlags::default()),
            Decision::Denied(DenyReason::AffiliateRestricted)
        );
    }

    #[test]
    fn wallet_gate_ignores_the_flag() {
        let rule = rule_for(DashboardMode::Staff, NavKey::WalletTransactions).unwrap();
        let granted = user(AccessMap::new().with("acc_v_wallet_transactions", true));
        let no_wallet = CompanyFlags {
            company_type: 1,
            company_wallet_system: false,
        };
        assert_eq!(
            evaluate(rule, &granted, &no_wallet),
            Decision::Denied(DenyReason::WalletSystemDisabled)
        );
        let wallet = CompanyFlags {
            company_wallet_system: true,
            ..no_wallet
        };
        assert!(evaluate(rule, &granted, &wallet).is_visible());
    }
}
