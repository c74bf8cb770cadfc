//! Host pages for the headless session: each known site's composer markup,
//! plus some decoys every chat UI has.

use core_types::Viewport;
use html::Node;
use html::build::{doc, elem, text};
use page::Page;
use picker::{SiteId, detect_site};

const COMPOSER: &str = "left: 480px; top: 900px; width: 960px; height: 80px";

fn editor(classes: &str, attrs: &[(&str, &str)]) -> Node {
    let mut all = vec![("class", classes), ("contenteditable", "true"), ("style", COMPOSER)];
    all.extend_from_slice(attrs);
    elem("div", &all, vec![])
}

fn textarea(attrs: &[(&str, &str)]) -> Node {
    let mut all = vec![("style", COMPOSER)];
    all.extend_from_slice(attrs);
    elem("textarea", &all, vec![])
}

/// The composer subtree for `site`, and whether its editor handles pastes.
pub fn composer(site: Option<SiteId>) -> (Node, bool) {
    match site {
        Some(SiteId::ChatGpt) => (
            elem(
                "form",
                &[],
                vec![editor("ProseMirror", &[("id", "prompt-textarea")])],
            ),
            false,
        ),
        Some(SiteId::Claude) => (
            elem(
                "fieldset",
                &[],
                vec![editor("ProseMirror", &[("aria-label", "Write your prompt to Claude")])],
            ),
            true,
        ),
        Some(SiteId::Gemini) => (
            elem("rich-textarea", &[], vec![editor("ql-editor textarea", &[])]),
            true,
        ),
        Some(SiteId::Perplexity) => (textarea(&[("placeholder", "Ask anything…")]), false),
        Some(SiteId::DeepSeek) => (textarea(&[("id", "chat-input")]), false),
        Some(SiteId::Grok) => (textarea(&[("aria-label", "Ask Grok anything")]), false),
        Some(SiteId::Copilot) => (textarea(&[("id", "userInput")]), false),
        Some(SiteId::Mistral) => (textarea(&[("placeholder", "Ask le Chat")]), false),
        None => (textarea(&[("placeholder", "Comment")]), false),
    }
}

pub fn page_for(origin: &str, viewport: Viewport) -> Page {
    let (composer, handles_paste) = composer(detect_site(origin));
    let root = doc(vec![elem(
        "html",
        &[],
        vec![
            elem("head", &[], vec![elem("style", &[], vec![text(".sr-only { display: none }")])]),
            elem(
                "body",
                &[],
                vec![
                    elem(
                        "nav",
                        &[],
                        vec![elem(
                            "input",
                            &[("type", "search"), ("placeholder", "Search chats"), ("style", "left: 16px; top: 16px; width: 240px; height: 32px")],
                            vec![],
                        )],
                    ),
                    elem(
                        "main",
                        &[("id", "thread")],
                        vec![
                            elem("p", &[("style", "left: 320px; top: 100px; width: 1280px; height: 60px")], vec![text("How can I help you today?")]),
                            elem("textarea", &[("class", "sr-only")], vec![]),
                        ],
                    ),
                    elem("div", &[("id", "composer-slot")], vec![composer]),
                ],
            ),
        ],
    )]);
    let mut page = Page::new(origin, root).with_viewport(viewport);
    if handles_paste {
        wire_editor(&mut page);
    }
    page
}

/// Register the host editor's paste listener on the mounted composer.
pub fn wire_editor(page: &mut Page) {
    if let Some(editor) = page.find(r#"[contenteditable="true"]"#) {
        page.install_paste_handler(editor);
    }
}
