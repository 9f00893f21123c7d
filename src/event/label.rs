//! Label normalization for free-text fields
//!
//! Spreadsheet exports mix Czech and English labels with inconsistent case and
//! diacritics, so matching is done on a folded form.

/// Fold a label to lowercase ASCII with collapsed whitespace.
///
/// Czech (and common Central European) diacritics are mapped to their base
/// letter; `_` and `-` are treated as spaces so `food_festival` and
/// `Food Festival` fold to the same key.
pub fn fold_label(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let base = match ch {
            'á' | 'à' | 'â' | 'ä' | 'ą' => 'a',
            'č' | 'ć' | 'ç' => 'c',
            'ď' => 'd',
            'é' | 'ě' | 'è' | 'ê' | 'ë' | 'ę' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ľ' | 'ĺ' | 'ł' => 'l',
            'ň' | 'ń' => 'n',
            'ó' | 'ò' | 'ô' | 'ö' | 'ő' => 'o',
            'ř' | 'ŕ' => 'r',
            'š' | 'ś' => 's',
            'ť' => 't',
            'ú' | 'ů' | 'ù' | 'û' | 'ü' | 'ű' => 'u',
            'ý' => 'y',
            'ž' | 'ź' | 'ż' => 'z',
            '_' | '-' => ' ',
            other => other,
        };

        if base.is_whitespace() {
            pending_space = !folded.is_empty();
            continue;
        }
        if pending_space {
            folded.push(' ');
            pending_space = false;
        }
        folded.push(base);
    }

    folded
}

/// Folded first comma-delimited token of a place name.
///
/// `"Praha, Výstaviště Holešovice"` and `"praha"` share the key `"praha"`.
pub fn location_key(location: &str) -> String {
    let head = location.split(',').next().unwrap_or_default();
    fold_label(head)
}
