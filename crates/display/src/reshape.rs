//! Contextual reshaping for Arabic-script letters.
//!
//! Each joining letter is replaced by its presentation form (isolated,
//! final, initial or medial) depending on whether its neighbours join to it.
//! Lam followed by an alef variant becomes a single ligature. Harakat are
//! transparent for joining; a zero-width non-joiner or any non-joining
//! character breaks the chain.

use crate::DisplayTransform;

const LAM: char = '\u{0644}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Joins on both sides: four presentation forms.
    Dual,
    /// Joins only to the preceding letter: isolated and final forms.
    Right,
    /// Tatweel and ZWJ: join both sides but have no forms of their own.
    Causing,
}

impl Joining {
    fn joins_following(self) -> bool {
        matches!(self, Joining::Dual | Joining::Causing)
    }
}

/// `(letter, [isolated, final, initial, medial])`, sorted by letter.
/// A zero initial form marks a right-joining letter.
const FORMS: &[(char, [u32; 4])] = &[
    ('\u{0622}', [0xFE81, 0xFE82, 0, 0]),
    ('\u{0623}', [0xFE83, 0xFE84, 0, 0]),
    ('\u{0624}', [0xFE85, 0xFE86, 0, 0]),
    ('\u{0625}', [0xFE87, 0xFE88, 0, 0]),
    ('\u{0626}', [0xFE89, 0xFE8A, 0xFE8B, 0xFE8C]),
    ('\u{0627}', [0xFE8D, 0xFE8E, 0, 0]),
    ('\u{0628}', [0xFE8F, 0xFE90, 0xFE91, 0xFE92]),
    ('\u{0629}', [0xFE93, 0xFE94, 0, 0]),
    ('\u{062A}', [0xFE95, 0xFE96, 0xFE97, 0xFE98]),
    ('\u{062B}', [0xFE99, 0xFE9A, 0xFE9B, 0xFE9C]),
    ('\u{062C}', [0xFE9D, 0xFE9E, 0xFE9F, 0xFEA0]),
    ('\u{062D}', [0xFEA1, 0xFEA2, 0xFEA3, 0xFEA4]),
    ('\u{062E}', [0xFEA5, 0xFEA6, 0xFEA7, 0xFEA8]),
    ('\u{062F}', [0xFEA9, 0xFEAA, 0, 0]),
    ('\u{0630}', [0xFEAB, 0xFEAC, 0, 0]),
    ('\u{0631}', [0xFEAD, 0xFEAE, 0, 0]),
    ('\u{0632}', [0xFEAF, 0xFEB0, 0, 0]),
    ('\u{0633}', [0xFEB1, 0xFEB2, 0xFEB3, 0xFEB4]),
    ('\u{0634}', [0xFEB5, 0xFEB6, 0xFEB7, 0xFEB8]),
    ('\u{0635}', [0xFEB9, 0xFEBA, 0xFEBB, 0xFEBC]),
    ('\u{0636}', [0xFEBD, 0xFEBE, 0xFEBF, 0xFEC0]),
    ('\u{0637}', [0xFEC1, 0xFEC2, 0xFEC3, 0xFEC4]),
    ('\u{0638}', [0xFEC5, 0xFEC6, 0xFEC7, 0xFEC8]),
    ('\u{0639}', [0xFEC9, 0xFECA, 0xFECB, 0xFECC]),
    ('\u{063A}', [0xFECD, 0xFECE, 0xFECF, 0xFED0]),
    ('\u{0641}', [0xFED1, 0xFED2, 0xFED3, 0xFED4]),
    ('\u{0642}', [0xFED5, 0xFED6, 0xFED7, 0xFED8]),
    ('\u{0643}', [0xFED9, 0xFEDA, 0xFEDB, 0xFEDC]),
    ('\u{0644}', [0xFEDD, 0xFEDE, 0xFEDF, 0xFEE0]),
    ('\u{0645}', [0xFEE1, 0xFEE2, 0xFEE3, 0xFEE4]),
    ('\u{0646}', [0xFEE5, 0xFEE6, 0xFEE7, 0xFEE8]),
    ('\u{0647}', [0xFEE9, 0xFEEA, 0xFEEB, 0xFEEC]),
    ('\u{0648}', [0xFEED, 0xFEEE, 0, 0]),
    ('\u{0649}', [0xFEEF, 0xFEF0, 0, 0]),
    ('\u{064A}', [0xFEF1, 0xFEF2, 0xFEF3, 0xFEF4]),
    ('\u{0671}', [0xFB50, 0xFB51, 0, 0]),
    ('\u{067E}', [0xFB56, 0xFB57, 0xFB58, 0xFB59]),
    ('\u{0686}', [0xFB7A, 0xFB7B, 0xFB7C, 0xFB7D]),
    ('\u{0698}', [0xFB8A, 0xFB8B, 0, 0]),
    ('\u{06A9}', [0xFB8E, 0xFB8F, 0xFB90, 0xFB91]),
    ('\u{06AF}', [0xFB92, 0xFB93, 0xFB94, 0xFB95]),
    ('\u{06BE}', [0xFBAA, 0xFBAB, 0xFBAC, 0xFBAD]),
    ('\u{06C0}', [0xFBA4, 0xFBA5, 0, 0]),
    ('\u{06CC}', [0xFBFC, 0xFBFD, 0xFBFE, 0xFBFF]),
];

/// `(alef variant, [isolated, final])` ligature forms of lam + alef.
const LAM_ALEF: &[(char, [u32; 2])] = &[
    ('\u{0622}', [0xFEF5, 0xFEF6]),
    ('\u{0623}', [0xFEF7, 0xFEF8]),
    ('\u{0625}', [0xFEF9, 0xFEFA]),
    ('\u{0627}', [0xFEFB, 0xFEFC]),
];

fn forms(ch: char) -> Option<&'static [u32; 4]> {
    FORMS
        .binary_search_by_key(&ch, |(letter, _)| *letter)
        .ok()
        .map(|idx| &FORMS[idx].1)
}

fn joining(ch: char) -> Option<Joining> {
    if matches!(ch, '\u{0640}' | '\u{200D}') {
        return Some(Joining::Causing);
    }
    forms(ch).map(|f| if f[2] == 0 { Joining::Right } else { Joining::Dual })
}

fn is_transparent(ch: char) -> bool {
    matches!(ch, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

fn prev_joining(chars: &[char], idx: usize) -> Option<Joining> {
    chars[..idx]
        .iter()
        .rev()
        .find(|c| !is_transparent(**c))
        .and_then(|c| joining(*c))
}

fn next_solid(chars: &[char], idx: usize) -> Option<usize> {
    (idx + 1..chars.len()).find(|&i| !is_transparent(chars[i]))
}

fn form_char(code: u32, fallback: char) -> char {
    char::from_u32(code).unwrap_or(fallback)
}

/// Replaces Arabic-script letters with their contextual presentation forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reshape;

impl Reshape {
    pub fn reshape(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        let mut idx = 0;

        while idx < chars.len() {
            let ch = chars[idx];
            let Some(letter_forms) = forms(ch) else {
                out.push(ch);
                idx += 1;
                continue;
            };

            let joins_prev = prev_joining(&chars, idx).is_some_and(Joining::joins_following);
            let next = next_solid(&chars, idx);

            if ch == LAM {
                let ligature = next.and_then(|n| {
                    LAM_ALEF
                        .iter()
                        .find(|(alef, _)| *alef == chars[n])
                        .map(|(_, lig)| (n, lig))
                });
                if let Some((alef_idx, lig)) = ligature {
                    out.push(form_char(if joins_prev { lig[1] } else { lig[0] }, ch));
                    // Marks between lam and alef follow the ligature.
                    out.extend(&chars[idx + 1..alef_idx]);
                    idx = alef_idx + 1;
                    continue;
                }
            }

            let is_dual = letter_forms[2] != 0;
            let joins_next = is_dual
                && next.is_some_and(|n| joining(chars[n]).is_some());

            let code = match (joins_prev, joins_next) {
                (false, false) => letter_forms[0],
                (true, false) => letter_forms[1],
                (false, true) => letter_forms[2],
                (true, true) => letter_forms[3],
            };
            out.push(form_char(code, ch));
            idx += 1;
        }

        out
    }
}

impl DisplayTransform for Reshape {
    fn apply(&self, text: &str) -> String {
        Reshape::reshape(text)
    }

    fn name(&self) -> &'static str {
        "reshape"
    }
}
