// Rule tables for contact detection
// Patterns are composed from named fragments so each rule's shape stays readable

use super::boundary::Boundary;
use super::rules::RuleFamily;
use super::ContactKind;

/// Uncompiled rule: pattern source plus the metadata it reports with
#[derive(Debug, Clone)]
pub struct RuleSpec {
    /// Stable rule identifier, used in logs and tests
    pub name: &'static str,
    pub kind: ContactKind,
    pub family: RuleFamily,
    pub pattern: String,
    pub boundary: Boundary,
}

impl RuleSpec {
    fn direct(name: &'static str, kind: ContactKind, pattern: String, boundary: Boundary) -> Self {
        Self { name, kind, family: RuleFamily::Direct, pattern, boundary }
    }

    fn contextual(name: &'static str, kind: ContactKind, pattern: String) -> Self {
        Self {
            name,
            kind,
            family: RuleFamily::Contextual,
            pattern,
            boundary: Boundary::Standalone,
        }
    }
}

// Identifier shapes
const EMAIL: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}";
const PHONE_INTERNATIONAL: &str = r"\+\d{1,3}[\s\-]?(?:\(\d{1,4}\)|\d{1,4})(?:[\s\-]?\d{2,4}){2,4}";
const PHONE_AREA_CODE: &str = r"\(\d{3}\)\s?\d{3}-\d{4}";
const PHONE_DASHED: &str = r"\b\d{3}-\d{3}-\d{4}\b";
const PHONE_BARE: &str = r"\b\d{10}\b";
// Digits with common separators, only used after a keyword
const PHONE_LOOSE: &str = r"\+?[\d(][\d\s()\-]{7,}\d";
// Handles and identifiers are ASCII; Cyrillic words are never handles
const TELEGRAM_HANDLE: &str = r"@[A-Za-z0-9_]{5,32}";
// Up to 30 chars, never ending on a dot
const INSTAGRAM_BODY: &str = r"[A-Za-z0-9_.]{0,29}[A-Za-z0-9_]";
const IDENTIFIER: &str = r"[A-Za-z0-9_.\-]+";
const DOMAIN_LABEL: &str = r"[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?";
// Path may not end in sentence punctuation
const URL_PATH: &str = r"(?:/(?:[A-Za-z0-9_\-./?%&=#~+:]*[A-Za-z0-9_\-/?%&=#~+])?)?";

// Keyword followed by a colon or at least one space
const KEYWORD_SEPARATOR: &str = r"(?:\s*:\s*|\s+)";

/// Rules that recognise identifiers without needing a keyword
///
/// Table order matters: when two rules produce the same span, the earlier
/// rule's kind is reported.
pub fn direct_rule_specs() -> Vec<RuleSpec> {
    let sep = KEYWORD_SEPARATOR;

    let instagram_handle = format!("@{INSTAGRAM_BODY}");
    let telegram_keyword = format!(r"(?i)(?:телеграм|telegram)\s*:?\s*{TELEGRAM_HANDLE}");
    let instagram_keyword = format!(r"(?i)(?:інстаграм|instagram)(?:\s*:?\s*{instagram_handle})?");
    let whatsapp = format!(r"(?i)(?:whatsapp|wa\.me|вацап|ватсап)(?:\s*[:/]\s*|\s+){PHONE_LOOSE}");
    let skype = format!(r"(?i)(?:skype|скайп){sep}{IDENTIFIER}");
    let discord_invite = r"(?i)discord\.gg/[A-Za-z0-9_\-]+".to_string();
    let discord_keyword = format!(r"(?i)(?:discord|дискорд){sep}[A-Za-z0-9_.#\-]+");
    let linkedin_url = r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/(?:in|company)/[A-Za-z0-9_\-]+".to_string();
    let linkedin_keyword = format!(r"(?i)(?:лінкедін|linkedin){sep}{IDENTIFIER}");
    let website = format!(
        r"(?i)(?:https?://)?(?:www\.)?{DOMAIN_LABEL}(?:\.{DOMAIN_LABEL})*\.[a-z]{{2,}}{URL_PATH}"
    );

    vec![
        RuleSpec::direct("email", ContactKind::Email, EMAIL.to_string(), Boundary::Free),
        RuleSpec::direct("phone_international", ContactKind::Phone, PHONE_INTERNATIONAL.to_string(), Boundary::Standalone),
        RuleSpec::direct("phone_area_code", ContactKind::Phone, PHONE_AREA_CODE.to_string(), Boundary::Standalone),
        RuleSpec::direct("phone_dashed", ContactKind::Phone, PHONE_DASHED.to_string(), Boundary::Standalone),
        RuleSpec::direct("phone_bare", ContactKind::Phone, PHONE_BARE.to_string(), Boundary::Standalone),
        RuleSpec::direct("telegram_handle", ContactKind::Telegram, TELEGRAM_HANDLE.to_string(), Boundary::Standalone),
        RuleSpec::direct("telegram_keyword", ContactKind::Telegram, telegram_keyword, Boundary::Standalone),
        RuleSpec::direct("instagram_handle", ContactKind::Instagram, instagram_handle, Boundary::Standalone),
        RuleSpec::direct("instagram_keyword", ContactKind::Instagram, instagram_keyword, Boundary::Standalone),
        RuleSpec::direct("whatsapp", ContactKind::WhatsApp, whatsapp, Boundary::Standalone),
        RuleSpec::direct("skype", ContactKind::Skype, skype, Boundary::Standalone),
        RuleSpec::direct("discord_invite", ContactKind::Discord, discord_invite, Boundary::Standalone),
        RuleSpec::direct("discord_keyword", ContactKind::Discord, discord_keyword, Boundary::Standalone),
        RuleSpec::direct("linkedin_url", ContactKind::LinkedIn, linkedin_url, Boundary::Standalone),
        RuleSpec::direct("linkedin_keyword", ContactKind::LinkedIn, linkedin_keyword, Boundary::Standalone),
        RuleSpec::direct("website", ContactKind::Website, website, Boundary::Standalone),
    ]
}

/// Rules that need an explicit keyword right before the identifier
///
/// These catch shapes the direct table cannot claim on its own, such as a
/// handle without `@` or an email spelled out as "at ... dot".
pub fn contextual_rule_specs() -> Vec<RuleSpec> {
    let sep = KEYWORD_SEPARATOR;

    let at = r"(?:@|\s*\(at\)\s*|\s*\[at\]\s*|\s+at\s+|\s*собака\s*)";
    let dot = r"(?:\.|\s*\(dot\)\s*|\s*\[dot\]\s*|\s+dot\s+|\s*крапка\s*)";
    let email = format!(
        r"(?i)\b(?:пошта|e-mail|email|мейл|імейл){sep}[A-Za-z0-9_.%+\-]+{at}[A-Za-z0-9_\-]+{dot}[a-z]{{2,}}"
    );
    let phone = format!(
        r"(?i)\b(?:телефон|тел|phone|tel|номер|viber|вайбер)\.?\s*:?\s*{PHONE_LOOSE}"
    );
    let telegram = format!(r"(?i)\b(?:телеграм|телега|telegram|тг|tg){sep}@?[A-Za-z0-9_]{{5,32}}");
    let instagram = format!(r"(?i)\b(?:інстаграм|instagram|інста|инста|insta){sep}@?{INSTAGRAM_BODY}");

    vec![
        RuleSpec::contextual("email_keyword", ContactKind::Email, email),
        RuleSpec::contextual("phone_keyword", ContactKind::Phone, phone),
        RuleSpec::contextual("telegram_context", ContactKind::Telegram, telegram),
        RuleSpec::contextual("instagram_context", ContactKind::Instagram, instagram),
    ]
}
