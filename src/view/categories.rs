//! Human readable names for word categories and token classes
//!
//! Used to describe a token in its hover popup. Keys are the category codes
//! found in the second element of a token's meaning, plus the token classes
//! produced by [`classify`](crate::view::classify).

use once_cell::sync::Lazy;
use std::collections::HashMap;

static DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("kk", "karlkynsnafnorð"),
        ("kvk", "kvenkynsnafnorð"),
        ("hk", "hvorugkynsnafnorð"),
        ("so", "sagnorð"),
        ("lo", "lýsingarorð"),
        ("ao", "atviksorð"),
        ("fs", "forsetning"),
        ("st", "samtenging"),
        ("stt", "samtenging"),
        ("fn", "fornafn"),
        ("pfn", "persónufornafn"),
        ("abfn", "afturbeygt fornafn"),
        ("gr", "greinir"),
        ("to", "töluorð"),
        ("rt", "raðtala"),
        ("nhm", "nafnháttarmerki"),
        ("uh", "upphrópun"),
        ("entity", "sérnafn"),
        ("person", "mannsnafn"),
        ("nf", "óþekkt orð"),
        ("number", "tala"),
        ("percent", "prósenta"),
        ("ordinal", "raðtala"),
        ("date", "dagsetning"),
        ("time", "tími"),
        ("timestamp", "tímapunktur"),
        ("year", "ártal"),
        ("currency", "gjaldmiðill"),
        ("amount", "upphæð"),
        ("measurement", "mælieining"),
        ("telno", "símanúmer"),
        ("email", "tölvupóstfang"),
        ("url", "vefslóð"),
    ])
});

/// Description of a category code or token class, if known
pub fn describe(code: &str) -> Option<&'static str> {
    DESCRIPTIONS.get(code).copied()
}
