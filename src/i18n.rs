// i18n.rs
//
// Runtime string tables:
// - Strings live in either:
//   A) assets/i18n/<lang>.json
//   B) assets/i18n.json (single file, format: { "<lang>": { "key": "value" } })
// - Load order: selected lang -> fallback en -> the key itself
// - Lookup: tr("key") / tr_with("key", &[("name", "...")]) with {name} placeholders
//
// Language selection:
// - CLI: --lang <code> (e.g. en, zh-Hans)
// - Env: SPHERE_LANG
// - Default: en

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

pub const FALLBACK_LANG: &str = "en";
const LANG_ENV: &str = "SPHERE_LANG";

/// Languages offered in the Language menu: (code, native name).
pub const LANGUAGES: [(&str, &str); 2] = [("en", "English"), ("zh-Hans", "简体中文")];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
struct Table(HashMap<String, String>);

#[derive(Debug, Clone)]
pub struct I18n {
    lang: String,
    map: Table,
    fallback_map: Table,
}

static I18N: OnceCell<RwLock<I18n>> = OnceCell::new();

fn parse_table(text: &str) -> Option<Table> {
    serde_json::from_str(text).ok()
}

fn parse_multi_lang(text: &str, lang: &str) -> Option<Table> {
    let mut all: HashMap<String, Table> = serde_json::from_str(text).ok()?;
    all.remove(lang)
}

/// `<exe_dir>/assets/<rel>` first, then `./assets/<rel>`.
fn find_asset(rel: &Path) -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets").join(rel)));

    beside_exe
        .into_iter()
        .chain(std::iter::once(PathBuf::from("assets").join(rel)))
        .find(|p| p.exists())
}

fn load_lang(lang: &str) -> Table {
    let per_lang = PathBuf::from("i18n").join(format!("{lang}.json"));
    if let Some(p) = find_asset(&per_lang) {
        match std::fs::read_to_string(&p).ok().and_then(|t| parse_table(&t)) {
            Some(t) => return t,
            None => log::warn!("[i18n] ignoring unreadable table {}", p.display()),
        }
    }

    if let Some(p) = find_asset(Path::new("i18n.json")) {
        if let Some(t) = std::fs::read_to_string(&p)
            .ok()
            .and_then(|t| parse_multi_lang(&t, lang))
        {
            return t;
        }
    }

    log::debug!("[i18n] no strings for {lang}");
    Table::default()
}

/// Initialize global i18n. Safe to call again; later calls replace the tables.
pub fn init(lang: impl Into<String>) {
    let lang = lang.into();
    let map = load_lang(&lang);
    let fallback_map = if lang == FALLBACK_LANG {
        map.clone()
    } else {
        load_lang(FALLBACK_LANG)
    };

    let i = I18n {
        lang,
        map,
        fallback_map,
    };

    if let Some(lock) = I18N.get() {
        if let Ok(mut w) = lock.write() {
            *w = i;
        }
    } else {
        let _ = I18N.set(RwLock::new(i));
    }
}

/// Language of the active table, or the fallback before `init`.
pub fn current_lang() -> String {
    I18N.get()
        .and_then(|l| l.read().ok().map(|i| i.lang.clone()))
        .unwrap_or_else(|| FALLBACK_LANG.to_string())
}

fn lookup(i: &I18n, key: &str) -> Option<String> {
    i.map.0.get(key).or_else(|| i.fallback_map.0.get(key)).cloned()
}

/// Localized text by key. A missing key comes back as the key itself.
pub fn tr(key: &str) -> String {
    I18N.get()
        .and_then(|l| l.read().ok())
        .and_then(|i| lookup(&i, key))
        .unwrap_or_else(|| key.to_string())
}

fn substitute(mut s: String, args: &[(&str, String)]) -> String {
    for (k, v) in args {
        s = s.replace(&format!("{{{k}}}"), v);
    }
    s
}

/// Localized text with `{name}` placeholders filled in. Unknown placeholders stay.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    substitute(tr(key), args)
}

fn lang_from(mut args: impl Iterator<Item = String>, env: Option<String>) -> String {
    while let Some(a) = args.next() {
        if a == "--lang" {
            if let Some(v) = args.next() {
                return v;
            }
        }
    }

    env.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_LANG.to_string())
}

/// Choose language from CLI, then env.
pub fn resolve_lang_from_args() -> String {
    lang_from(std::env::args(), std::env::var(LANG_ENV).ok())
}
