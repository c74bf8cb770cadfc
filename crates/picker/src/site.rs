//! Site Classifier and the built-in [`SiteProfile`] table.

use core_types::Millis;
use css::SelectorList;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteId {
    ChatGpt,
    Claude,
    Gemini,
    Perplexity,
    DeepSeek,
    Grok,
    Copilot,
    Mistral,
}

impl SiteId {
    pub const ALL: [SiteId; 8] = [
        SiteId::ChatGpt,
        SiteId::Claude,
        SiteId::Gemini,
        SiteId::Perplexity,
        SiteId::DeepSeek,
        SiteId::Grok,
        SiteId::Copilot,
        SiteId::Mistral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SiteId::ChatGpt => "chatgpt",
            SiteId::Claude => "claude",
            SiteId::Gemini => "gemini",
            SiteId::Perplexity => "perplexity",
            SiteId::DeepSeek => "deepseek",
            SiteId::Grok => "grok",
            SiteId::Copilot => "copilot",
            SiteId::Mistral => "mistral",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a rich-text target receives a template.
///
/// Native text controls always take a direct value write; this tag only
/// decides the contenteditable path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertionKind {
    /// Set text content and dispatch `input`.
    Direct,
    /// Write the clipboard and dispatch a synthetic `paste`; the host editor
    /// resynchronizes its own model from it.
    ClipboardPaste,
}

#[derive(Debug)]
pub struct SiteProfile {
    pub id: SiteId,
    pub hosts: &'static [&'static str],
    /// Tried in order; earlier selectors win score ties.
    pub selectors: Vec<SelectorList>,
    pub insertion: InsertionKind,
    /// How long after load the host app usually needs to mount its composer.
    pub init_delay_ms: Millis,
}

struct ProfileDef {
    id: SiteId,
    hosts: &'static [&'static str],
    selectors: &'static [&'static str],
    insertion: InsertionKind,
    init_delay_ms: Millis,
}

const PROFILE_DEFS: &[ProfileDef] = &[
    ProfileDef {
        id: SiteId::ChatGpt,
        hosts: &["chatgpt.com", "chat.openai.com"],
        selectors: &[
            "#prompt-textarea",
            r#"div[contenteditable="true"][id="prompt-textarea"]"#,
            "form textarea",
            r#"[data-testid="composer"] [contenteditable="true"]"#,
        ],
        insertion: InsertionKind::Direct,
        init_delay_ms: 1000,
    },
    ProfileDef {
        id: SiteId::Claude,
        hosts: &["claude.ai"],
        selectors: &[
            r#"div.ProseMirror[contenteditable="true"]"#,
            r#"[contenteditable="true"][aria-label*="prompt" i]"#,
            r#"fieldset [contenteditable="true"]"#,
        ],
        insertion: InsertionKind::ClipboardPaste,
        init_delay_ms: 1500,
    },
    ProfileDef {
        id: SiteId::Gemini,
        hosts: &["gemini.google.com"],
        selectors: &[
            r#"rich-textarea .ql-editor[contenteditable="true"]"#,
            r#".ql-editor[contenteditable="true"]"#,
            r#"rich-textarea [contenteditable="true"]"#,
        ],
        insertion: InsertionKind::ClipboardPaste,
        init_delay_ms: 1500,
    },
    ProfileDef {
        id: SiteId::Perplexity,
        hosts: &["perplexity.ai", "www.perplexity.ai"],
        selectors: &[
            "textarea[placeholder]",
            "#ask-input",
            r#"[contenteditable="true"][role="textbox"]"#,
        ],
        insertion: InsertionKind::Direct,
        init_delay_ms: 1000,
    },
    ProfileDef {
        id: SiteId::DeepSeek,
        hosts: &["chat.deepseek.com"],
        selectors: &["textarea#chat-input", "textarea[placeholder]"],
        insertion: InsertionKind::Direct,
        init_delay_ms: 1000,
    },
    ProfileDef {
        id: SiteId::Grok,
        hosts: &["grok.com"],
        selectors: &["textarea[aria-label]", "form textarea", r#"[contenteditable="true"]"#],
        insertion: InsertionKind::Direct,
        init_delay_ms: 1000,
    },
    ProfileDef {
        id: SiteId::Copilot,
        hosts: &["copilot.microsoft.com"],
        selectors: &["textarea#userInput", "textarea[placeholder]"],
        insertion: InsertionKind::Direct,
        init_delay_ms: 1000,
    },
    ProfileDef {
        id: SiteId::Mistral,
        hosts: &["chat.mistral.ai"],
        selectors: &["textarea[placeholder]", r#".ProseMirror[contenteditable="true"]"#],
        insertion: InsertionKind::ClipboardPaste,
        init_delay_ms: 1000,
    },
];

/// Cross-site selectors for the low-confidence fallback tier.
const GENERIC_SELECTORS: &[&str] = &[
    "textarea",
    r#"[contenteditable="true"]"#,
    r#"[role="textbox"]"#,
    r#"input[type="text"]"#,
    "input",
];

fn parse_all(sources: &[&str]) -> Vec<SelectorList> {
    sources
        .iter()
        .filter_map(|src| match SelectorList::parse(src) {
            Ok(list) => Some(list),
            Err(e) => {
                log::error!(target: "picker.site", "dropping built-in selector {src:?}: {e}");
                None
            }
        })
        .collect()
}

fn profiles() -> &'static [SiteProfile] {
    static PROFILES: OnceLock<Vec<SiteProfile>> = OnceLock::new();
    PROFILES.get_or_init(|| {
        PROFILE_DEFS
            .iter()
            .map(|d| SiteProfile {
                id: d.id,
                hosts: d.hosts,
                selectors: parse_all(d.selectors),
                insertion: d.insertion,
                init_delay_ms: d.init_delay_ms,
            })
            .collect()
    })
}

pub fn profile_for(site: SiteId) -> &'static SiteProfile {
    // PROFILE_DEFS has exactly one entry per SiteId, in SiteId::ALL order.
    &profiles()[site as usize]
}

pub fn generic_selectors() -> &'static [SelectorList] {
    static GENERIC: OnceLock<Vec<SelectorList>> = OnceLock::new();
    GENERIC.get_or_init(|| parse_all(GENERIC_SELECTORS))
}

/// Reduce an origin (`host`, `host:port`, or a full URL) to a lowercase host
/// without a trailing dot.
pub fn normalize_host(origin: &str) -> Option<String> {
    let origin = origin.trim();
    let host = if origin.contains("://") {
        url::Url::parse(origin).ok()?.host_str()?.to_string()
    } else {
        let without_path = origin.split('/').next().unwrap_or(origin);
        match without_path.rsplit_once(':') {
            Some((h, port)) if port.bytes().all(|b| b.is_ascii_digit()) => h.to_string(),
            _ => without_path.to_string(),
        }
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    (!host.is_empty()).then_some(host)
}

/// Map a page origin to a known site. Pure; safe to call on every pass.
pub fn detect_site(origin: &str) -> Option<SiteId> {
    let host = normalize_host(origin)?;
    let site = PROFILE_DEFS
        .iter()
        .find(|d| d.hosts.iter().any(|h| host_matches(&host, h)))
        .map(|d| d.id);
    log::trace!(target: "picker.site", "{host} -> {site:?}");
    site
}

fn host_matches(host: &str, known: &str) -> bool {
    host == known
        || host
            .strip_suffix(known)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_has_a_profile_in_order() {
        assert_eq!(PROFILE_DEFS.len(), SiteId::ALL.len());
        for site in SiteId::ALL {
            let p = profile_for(site);
            assert_eq!(p.id, site);
            assert!(!p.hosts.is_empty());
        }
    }

    #[test]
    fn built_in_selectors_all_parse() {
        for def in PROFILE_DEFS {
            for src in def.selectors {
                assert!(SelectorList::parse(src).is_ok(), "{src:?}");
            }
            assert_eq!(profile_for(def.id).selectors.len(), def.selectors.len());
        }
        assert_eq!(generic_selectors().len(), GENERIC_SELECTORS.len());
    }

    #[test]
    fn classifies_known_hosts() {
        assert_eq!(detect_site("chatgpt.com"), Some(SiteId::ChatGpt));
        assert_eq!(detect_site("chat.openai.com"), Some(SiteId::ChatGpt));
        assert_eq!(detect_site("claude.ai"), Some(SiteId::Claude));
        assert_eq!(detect_site("gemini.google.com"), Some(SiteId::Gemini));
        assert_eq!(detect_site("www.perplexity.ai"), Some(SiteId::Perplexity));
        assert_eq!(detect_site("chat.deepseek.com"), Some(SiteId::DeepSeek));
        assert_eq!(detect_site("grok.com"), Some(SiteId::Grok));
        assert_eq!(detect_site("copilot.microsoft.com"), Some(SiteId::Copilot));
        assert_eq!(detect_site("chat.mistral.ai"), Some(SiteId::Mistral));
    }

    #[test]
    fn normalizes_case_ports_dots_and_urls() {
        assert_eq!(detect_site("ChatGPT.com."), Some(SiteId::ChatGpt));
        assert_eq!(detect_site("claude.ai:443"), Some(SiteId::Claude));
        assert_eq!(detect_site("https://claude.ai/new?x=1"), Some(SiteId::Claude));
        assert_eq!(detect_site("eu.claude.ai"), Some(SiteId::Claude));
    }

    #[test]
    fn unknown_and_lookalike_hosts_are_none() {
        for host in ["", "example.com", "notclaude.ai", "claude.ai.evil.com", "google.com", "http://"] {
            assert_eq!(detect_site(host), None, "{host:?}");
        }
    }
}
