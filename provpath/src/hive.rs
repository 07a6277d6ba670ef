//! Registry hive tables.
//!
//! [`RegistryHiveMap`] holds the two static tables used by the registry
//! provider and the registry path converter:
//! - hive aliases (`HKLM`, `HKCU:`, ...) mapped to canonical hive roots
//! - the ordered 32-bit view substitutions (`Wow6432Node` redirection)
//!
//! The standard map is built once on first use and never mutated.

use std::sync::OnceLock;

/// Canonical machine-wide hive root.
pub const HKEY_LOCAL_MACHINE: &str = "HKEY_LOCAL_MACHINE";
/// Canonical per-user hive root.
pub const HKEY_CURRENT_USER: &str = "HKEY_CURRENT_USER";
/// Canonical class registration root.
pub const HKEY_CLASSES_ROOT: &str = "HKEY_CLASSES_ROOT";
/// Canonical root holding every loaded user hive, keyed by SID.
pub const HKEY_USERS: &str = "HKEY_USERS";
/// Canonical current hardware profile root.
pub const HKEY_CURRENT_CONFIG: &str = "HKEY_CURRENT_CONFIG";
/// Canonical performance data root.
pub const HKEY_PERFORMANCE_DATA: &str = "HKEY_PERFORMANCE_DATA";

/// COM registration subkeys that are redirected under `Wow6432Node`.
const REDIRECTED_CLASS_KEYS: [&str; 8] = [
    "AppID",
    "CLSID",
    "DirectShow",
    "Interface",
    "Media Type",
    "MediaFoundation",
    "PROTOCOLS",
    "TypeLib",
];

/// One 32-bit view substitution.
///
/// A rule matches a native key path that starts with `prefix`
/// (case-insensitive, `prefix` ends with a separator) and whose next segment
/// passes the `only_before` / `unless_before` constraints. The matched prefix
/// is replaced with `replacement`; the remainder is kept verbatim.
///
/// # Examples
///
/// ```
/// use provpath::hive::Wow64Rule;
///
/// let rule = Wow64Rule::new(r"HKEY_LOCAL_MACHINE\SOFTWARE\", r"HKEY_LOCAL_MACHINE\SOFTWARE\Wow6432Node\")
///     .unless_before(&["Classes", "Wow6432Node"]);
/// assert_eq!(
///     rule.apply(r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor").as_deref(),
///     Some(r"HKEY_LOCAL_MACHINE\SOFTWARE\Wow6432Node\Vendor")
/// );
/// assert_eq!(rule.apply(r"HKEY_LOCAL_MACHINE\SOFTWARE\Wow6432Node\Vendor"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wow64Rule {
    prefix: String,
    replacement: String,
    only_before: Vec<String>,
    unless_before: Vec<String>,
}

impl Wow64Rule {
    /// Creates a rule replacing `prefix` with `replacement`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
            only_before: Vec::new(),
            unless_before: Vec::new(),
        }
    }

    /// Restricts the rule to paths whose next segment is one of `segments`.
    #[must_use]
    pub fn only_before(mut self, segments: &[&str]) -> Self {
        self.only_before = segments.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Skips paths whose next segment is one of `segments`.
    #[must_use]
    pub fn unless_before(mut self, segments: &[&str]) -> Self {
        self.unless_before = segments.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Rewrites `native` if the rule matches.
    #[must_use]
    pub fn apply(&self, native: &str) -> Option<String> {
        let rest = strip_prefix_ignore_case(native, &self.prefix)?;
        let next = rest.split('\\').next().unwrap_or_default();

        if !self.only_before.is_empty()
            && !self.only_before.iter().any(|s| s.eq_ignore_ascii_case(next))
        {
            return None;
        }
        if self.unless_before.iter().any(|s| s.eq_ignore_ascii_case(next)) {
            return None;
        }

        Some(format!("{}{rest}", self.replacement))
    }
}

/// Hive aliases and 32-bit view substitutions.
#[derive(Debug, Clone)]
pub struct RegistryHiveMap {
    aliases: Vec<(String, String)>,
    wow64: Vec<Wow64Rule>,
}

impl Default for RegistryHiveMap {
    fn default() -> Self {
        let aliases = [
            ("HKLM", HKEY_LOCAL_MACHINE),
            ("HKCU", HKEY_CURRENT_USER),
            ("HKCR", HKEY_CLASSES_ROOT),
            ("HKU", HKEY_USERS),
            ("HKCC", HKEY_CURRENT_CONFIG),
            ("HKPD", HKEY_PERFORMANCE_DATA),
        ]
        .into_iter()
        .map(|(alias, root)| (alias.to_string(), root.to_string()))
        .collect();

        let wow64 = vec![
            Wow64Rule::new(
                format!(r"{HKEY_LOCAL_MACHINE}\SOFTWARE\Classes\"),
                format!(r"{HKEY_LOCAL_MACHINE}\SOFTWARE\Classes\Wow6432Node\"),
            )
            .only_before(&REDIRECTED_CLASS_KEYS),
            Wow64Rule::new(
                format!(r"{HKEY_CLASSES_ROOT}\"),
                format!(r"{HKEY_CLASSES_ROOT}\Wow6432Node\"),
            )
            .only_before(&REDIRECTED_CLASS_KEYS),
            Wow64Rule::new(
                format!(r"{HKEY_LOCAL_MACHINE}\SOFTWARE\"),
                format!(r"{HKEY_LOCAL_MACHINE}\SOFTWARE\Wow6432Node\"),
            )
            .unless_before(&["Classes", "Wow6432Node"]),
        ];

        Self { aliases, wow64 }
    }
}

impl RegistryHiveMap {
    /// The process-wide standard map.
    #[must_use]
    pub fn standard() -> &'static RegistryHiveMap {
        static STANDARD: OnceLock<RegistryHiveMap> = OnceLock::new();
        STANDARD.get_or_init(RegistryHiveMap::default)
    }

    /// Creates a map from explicit tables.
    #[must_use]
    pub fn new(aliases: Vec<(String, String)>, wow64: Vec<Wow64Rule>) -> Self {
        Self { aliases, wow64 }
    }

    /// Canonical root for a hive token.
    ///
    /// Accepts short aliases and canonical names, with or without a trailing
    /// drive colon, in any case.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::hive::RegistryHiveMap;
    ///
    /// let map = RegistryHiveMap::standard();
    /// assert_eq!(map.canonical_root("hklm:"), Some("HKEY_LOCAL_MACHINE"));
    /// assert_eq!(map.canonical_root("HKEY_USERS"), Some("HKEY_USERS"));
    /// assert_eq!(map.canonical_root("SOFTWARE"), None);
    /// ```
    #[must_use]
    pub fn canonical_root(&self, token: &str) -> Option<&str> {
        let token = token.strip_suffix(':').unwrap_or(token);
        self.aliases
            .iter()
            .find(|(alias, root)| {
                alias.eq_ignore_ascii_case(token) || root.eq_ignore_ascii_case(token)
            })
            .map(|(_, root)| root.as_str())
    }

    /// Whether `token` is a drive-style hive prefix such as `HKLM:`.
    #[must_use]
    pub fn is_drive(&self, token: &str) -> bool {
        token.ends_with(':') && self.canonical_root(token).is_some()
    }

    /// Replaces the leading hive token of `native` with its canonical root.
    ///
    /// Returns `None` when the first segment is not a hive.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::hive::RegistryHiveMap;
    ///
    /// let map = RegistryHiveMap::standard();
    /// assert_eq!(
    ///     map.expand(r"HKCU:\Software\Vendor").as_deref(),
    ///     Some(r"HKEY_CURRENT_USER\Software\Vendor")
    /// );
    /// assert_eq!(map.expand(r"Software\Vendor"), None);
    /// ```
    #[must_use]
    pub fn expand(&self, native: &str) -> Option<String> {
        let (head, rest) = match native.split_once('\\') {
            Some((head, rest)) => (head, Some(rest)),
            None => (native, None),
        };
        let root = self.canonical_root(head)?;
        Some(match rest {
            Some(rest) if !rest.is_empty() => format!(r"{root}\{rest}"),
            _ => root.to_string(),
        })
    }

    /// Applies every matching 32-bit view substitution, in table order.
    ///
    /// Each rule sees the output of the rules before it.
    #[must_use]
    pub fn apply_wow64(&self, native: &str) -> String {
        let mut current = native.to_string();
        for rule in &self.wow64 {
            if let Some(rewritten) = rule.apply(&current) {
                log::debug!("32-bit view: {current} -> {rewritten}");
                current = rewritten;
            }
        }
        current
    }

    /// Rewrites a per-user hive path to the per-SID path under the users root.
    ///
    /// Returns `None` if `native` is not rooted at the per-user hive.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::hive::RegistryHiveMap;
    ///
    /// let map = RegistryHiveMap::standard();
    /// assert_eq!(
    ///     map.rebase_to_sid(r"HKEY_CURRENT_USER\Software\X", "S-1-5-21-1").as_deref(),
    ///     Some(r"HKEY_USERS\S-1-5-21-1\Software\X")
    /// );
    /// assert_eq!(map.rebase_to_sid(r"HKEY_LOCAL_MACHINE\Software", "S-1-5-21-1"), None);
    /// ```
    #[must_use]
    pub fn rebase_to_sid(&self, native: &str, sid: &str) -> Option<String> {
        let rest = strip_prefix_ignore_case(native, HKEY_CURRENT_USER)?;
        if rest.is_empty() {
            return Some(format!(r"{HKEY_USERS}\{sid}"));
        }
        rest.strip_prefix('\\')
            .map(|rest| format!(r"{HKEY_USERS}\{sid}\{rest}"))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}
