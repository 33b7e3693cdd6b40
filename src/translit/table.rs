//! Arabic-script Southern Uzbek -> Latin substitution tables
//!
//! Keys are script sequences, including positional forms written with a
//! tatweel (`ـ`) and vowel diacritics. Where a key appears in both tables,
//! [`CONSONANTS`] wins.

/// Vowel sequences
pub static VOWELS: &[(&str, &str)] = &[
    // alef-carried vowels
    ("اَ", "a"),
    ("آ", "o"),
    ("اِیـ", "i"),
    ("اِی", "i"),
    ("اېـ", "e"),
    ("اې", "e"),
    ("اۉ", "oʻ"),
    ("اُو", "u"),
    ("او", "u"),
    ("اِ", "i"),
    ("اُ", "u"),

    // vowels after a joining letter (tatweel-marked)
    ("ـَه", "a"),
    ("ـه", "a"),
    ("ـَ", "a"),
    ("ـ", "a"),
    ("ـا", "o"),
    ("ـِی", "i"),
    ("ـې", "e"),
    ("ـِه", "e"),
    ("ـِ", "i"),
    ("ي", "i"),
    ("ـُو", "u"),
    ("ـۉ", "oʻ"),
    ("ـُ", "u"),

    // bare vowel letters
    ("ا", "a"),
    ("ې", "e"),
    ("ۉ", "oʻ"),
    ("ی", "y"),
    ("و", "v"),
];

/// Consonants in isolated, initial, medial and final forms
pub static CONSONANTS: &[(&str, &str)] = &[
    ("ب", "b"), ("بـ", "b"), ("ـبـ", "b"), ("ـب", "b"),
    ("پ", "p"), ("پـ", "p"), ("ـپـ", "p"), ("ـپ", "p"),
    ("ت", "t"), ("تـ", "t"), ("ـتـ", "t"), ("ـت", "t"),
    ("ث", "s"), ("ثـ", "s"), ("ـثـ", "s"), ("ـث", "s"),
    ("ج", "j"), ("جـ", "j"), ("ـجـ", "j"), ("ـج", "j"),
    ("چ", "ch"), ("چـ", "ch"), ("ـچـ", "ch"), ("ـچ", "ch"),
    ("ح", "h"), ("حـ", "h"), ("ـحـ", "h"), ("ـح", "h"),
    ("خ", "x"), ("خـ", "x"), ("ـخـ", "x"), ("ـخ", "x"),
    ("د", "d"), ("ـد", "d"),
    ("ذ", "z"), ("ـذ", "z"),
    ("ر", "r"), ("ـر", "r"),
    ("ز", "z"), ("ـز", "z"),
    ("ژ", "j"), ("ـژ", "j"),
    ("س", "s"), ("سـ", "s"), ("ـسـ", "s"), ("ـس", "s"),
    ("ش", "sh"), ("شـ", "sh"), ("ـشـ", "sh"), ("ـش", "sh"),
    ("ص", "s"), ("صـ", "s"), ("ـصـ", "s"), ("ـص", "s"),
    ("ض", "z"), ("ضـ", "z"), ("ـضـ", "z"), ("ـض", "z"),
    ("ط", "t"), ("طـ", "t"), ("ـطـ", "t"), ("ـط", "t"),
    ("ظ", "z"), ("ظـ", "z"), ("ـظـ", "z"), ("ـظ", "z"),
    ("ع", "ʻ"), ("عـ", "ʻ"), ("ـعـ", "ʻ"), ("ـع", "ʻ"),
    ("غ", "gʻ"), ("غـ", "gʻ"), ("ـغـ", "gʻ"), ("ـغ", "gʻ"),
    ("ف", "f"), ("فـ", "f"), ("ـفـ", "f"), ("ـف", "f"),
    ("ق", "q"), ("قـ", "q"), ("ـقـ", "q"), ("ـق", "q"),
    ("ک", "k"), ("کـ", "k"), ("ـکـ", "k"), ("ـک", "k"),
    ("گ", "g"), ("گـ", "g"), ("ـگـ", "g"), ("ـگ", "g"),
    ("ل", "l"), ("لـ", "l"), ("ـلـ", "l"), ("ـل", "l"),
    ("م", "m"), ("مـ", "m"), ("ـمـ", "m"), ("ـم", "m"),
    ("ن", "n"), ("نـ", "n"), ("ـنـ", "n"), ("ـن", "n"),
    ("نگ", "ng"), ("نگـ", "ng"), ("ـنگـ", "ng"), ("ـنگ", "ng"),
    ("و", "v"), ("ـو", "v"),
    ("ه", "h"), ("هـ", "h"), ("ـهـ", "h"), ("ـه", "h"),
    ("ی", "i"), ("یـ", "i"), ("ـیـ", "i"), ("ـی", "i"),
    ("ء", "ʻ"), ("ئـ", "ʻ"), ("ـئـ", "ʻ"), ("أ", "ʻ"), ("ـأ", "ʻ"), ("ؤ", "ʻ"), ("ـؤ", "ʻ"),
];

/// All entries in insertion order; later entries override earlier ones
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    VOWELS.iter().chain(CONSONANTS.iter()).copied()
}
