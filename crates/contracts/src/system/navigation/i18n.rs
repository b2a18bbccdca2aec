//! Translated titles for navigation nodes and section subheaders.
//!
//! Lookup is keyed by [`NavKey`] / [`SectionKey`]; the returned strings are
//! for display only.

use serde::{Deserialize, Serialize};

use super::{NavKey, SectionKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub const ALL: &'static [Locale] = &[Locale::En, Locale::Ru];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Accepts `ru`, `ru-RU`, `RU`...; anything unknown falls back to English.
    pub fn parse(tag: &str) -> Locale {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ru") {
            Locale::Ru
        } else {
            Locale::En
        }
    }
}

pub fn title(key: NavKey, locale: Locale) -> &'static str {
    let (en, ru) = match key {
        NavKey::Dashboard => ("Dashboard", "Панель"),
        NavKey::Customers => ("Customers", "Клиенты"),
        NavKey::Leads => ("Leads", "Лиды"),
        NavKey::Affiliates => ("Affiliates", "Партнёры"),
        NavKey::Tasks => ("Tasks", "Задачи"),
        NavKey::Calendar => ("Calendar", "Календарь"),
        NavKey::Chat => ("Chat", "Чат"),
        NavKey::Payments => ("Payments", "Платежи"),
        NavKey::Deposits => ("Deposits", "Депозиты"),
        NavKey::Withdrawals => ("Withdrawals", "Выводы"),
        NavKey::WalletTransactions => ("Wallet Transactions", "Транзакции кошелька"),
        NavKey::PaymentAudit => ("Payment Audit", "Аудит платежей"),
        NavKey::Risk => ("Risk", "Риски"),
        NavKey::RiskOverview => ("Overview", "Обзор"),
        NavKey::RiskPositions => ("Positions", "Позиции"),
        NavKey::RiskBets => ("Bets", "Ставки"),
        NavKey::RiskExposure => ("Exposure", "Экспозиция"),
        NavKey::RiskAudit => ("Risk Audit", "Аудит рисков"),
        NavKey::Compliance => ("Compliance", "Комплаенс"),
        NavKey::RegulationAudit => ("Regulation Audit", "Регуляторный аудит"),
        NavKey::KycDocuments => ("KYC Documents", "KYC документы"),
        NavKey::Reports => ("Reports", "Отчёты"),
        NavKey::SalesReport => ("Sales", "Продажи"),
        NavKey::AffiliateReport => ("Affiliate Performance", "Эффективность партнёров"),
        NavKey::RetentionReport => ("Retention", "Удержание"),
        NavKey::CallReport => ("Calls", "Звонки"),
        NavKey::PaymentReport => ("Payments Summary", "Сводка платежей"),
        NavKey::Announcements => ("Announcements", "Объявления"),
        NavKey::WhatsApp => ("WhatsApp", "WhatsApp"),
        NavKey::AiQuestions => ("AI Questions", "Вопросы ИИ"),
        NavKey::IbRoom => ("IB Room", "Комната IB"),
        NavKey::StaffUsers => ("Staff", "Сотрудники"),
        NavKey::Teams => ("Teams", "Команды"),
        NavKey::Logs => ("Logs", "Журнал"),
        NavKey::Integration => ("Integration", "Интеграции"),
        NavKey::Settings => ("Settings", "Настройки"),
        NavKey::Profile => ("Profile", "Профиль"),
        NavKey::MyCustomers => ("My Customers", "Мои клиенты"),
        NavKey::MyLeads => ("My Leads", "Мои лиды"),
        NavKey::Commissions => ("Commissions", "Комиссии"),
        NavKey::SubAffiliates => ("Sub-Affiliates", "Субпартнёры"),
        NavKey::MarketingLinks => ("Marketing Links", "Маркетинговые ссылки"),
        NavKey::Payouts => ("Payouts", "Выплаты"),
        NavKey::ConversionReport => ("Conversion", "Конверсия"),
        NavKey::EarningsReport => ("Earnings", "Доходы"),
    };
    pick(locale, en, ru)
}

pub fn subheader(section: SectionKey, locale: Locale) -> &'static str {
    let (en, ru) = match section {
        SectionKey::General => ("General", "Общее"),
        SectionKey::Finance => ("Finance", "Финансы"),
        SectionKey::Reports => ("Reports", "Отчёты"),
        SectionKey::Communication => ("Communication", "Коммуникации"),
        SectionKey::Administration => ("Administration", "Администрирование"),
        SectionKey::Support => ("Support", "Поддержка"),
    };
    pick(locale, en, ru)
}

fn pick(locale: Locale, en: &'static str, ru: &'static str) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::Ru => ru,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_region_tags() {
        assert_eq!(Locale::parse("ru-RU"), Locale::Ru);
        assert_eq!(Locale::parse("RU"), Locale::Ru);
        assert_eq!(Locale::parse("en_GB"), Locale::En);
        assert_eq!(Locale::parse("tlh"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn every_key_has_a_title_in_every_locale() {
        for locale in Locale::ALL {
            for key in NavKey::ALL {
                assert!(!title(*key, *locale).is_empty(), "{key:?} in {locale:?}");
            }
        }
    }

    #[test]
    fn some_titles_collide_across_keys() {
        // Section and entry titles share text; only keys disambiguate them.
        assert_eq!(
            title(NavKey::Reports, Locale::En),
            subheader(SectionKey::Reports, Locale::En)
        );
        assert_eq!(title(NavKey::WhatsApp, Locale::En), title(NavKey::WhatsApp, Locale::Ru));
    }
}
