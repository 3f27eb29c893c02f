//! Built-in stop words for raw-text mode.
//!
//! Only words of three or more letters matter, shorter ones never survive
//! tokenization anyway.

use std::collections::HashSet;

pub const ENGLISH: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "and", "any", "are", "because", "been",
    "before", "being", "below", "between", "both", "but", "can", "could", "did", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its", "itself",
    "just", "more", "most", "myself", "nor", "not", "now", "off", "once", "only", "other", "our",
    "ours", "ourselves", "out", "over", "own", "same", "she", "should", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "too", "under", "until", "very", "was", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours", "yourself", "yourselves",
];

pub const RUSSIAN: &[&str] = &[
    "без", "более", "бы", "был", "была", "были", "было", "быть", "вам", "вас", "весь", "во",
    "вот", "все", "всего", "всех", "где", "даже", "для", "его", "ее", "её", "если", "есть", "еще",
    "ещё", "здесь", "или", "им", "их", "как", "какой", "когда", "кто", "ли", "между", "меня",
    "мне", "может", "мой", "мы", "над", "нас", "него", "нее", "неё", "нет", "ни", "них", "ничего",
    "но", "ну", "об", "она", "они", "оно", "опять", "от", "очень", "по", "под", "после", "при",
    "про", "раз", "сам", "себя", "со", "так", "также", "такой", "там", "тебя", "тем", "то",
    "того", "тоже", "только", "том", "тут", "уже", "хоть", "чего", "чем", "через", "что",
    "чтобы", "эти", "это", "этого", "этой", "этот",
];

/// English and Russian stop words in one set.
pub fn default_stop_words() -> HashSet<String> {
    ENGLISH
        .iter()
        .chain(RUSSIAN)
        .map(|word| word.to_string())
        .collect()
}
