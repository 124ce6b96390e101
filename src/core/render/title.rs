const STRIPPED_PREFIXES: &[&str] = &["AI - ", "AI | ", "국내: ", "구글 - ", "⚡️ 퀵메모 - "];

const SHORT_TITLE_CHARS: usize = 15;
const SHORT_TITLE_SUFFIX: &str = " | AI 인사이트";

const PHRASE_REWRITES: &[(&str, &str)] = &[
    ("수업 요약 노트", "핵심 요약 가이드"),
    ("사용기", "실제 활용 팁과 후기"),
    ("정리", "올인원 가이드"),
    ("트렌드", "최신 트렌드 분석"),
];

/// Display form of a post title. The stored title is left as published.
pub fn rewrite_title(title: &str) -> String {
    let stripped = STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| title.strip_prefix(prefix))
        .unwrap_or(title);

    let mut display = stripped.to_string();
    if display.chars().count() < SHORT_TITLE_CHARS {
        display.push_str(SHORT_TITLE_SUFFIX);
    }

    for (phrase, replacement) in PHRASE_REWRITES {
        if display.contains(phrase) {
            display = display.replace(phrase, replacement);
        }
    }
    display
}
