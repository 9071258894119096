use super::*;
use crate::Diagnosis;

fn render(diagnosis: &Diagnosis) -> String {
    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.begin();
    emitter.emit_all(diagnosis);
    emitter.end();
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

#[test]
fn test_empty_array() {
    assert_eq!(render(&Diagnosis::new()), "[]\n");
}

#[test]
fn test_full_entry() {
    let mut diagnosis = Diagnosis::new();
    diagnosis.error(
        Entry::new("missing ';' at end of the declaration")
            .at(SourceLocation::new(0, 0))
            .with_fix("add ';'"),
    );
    assert_eq!(
        render(&diagnosis),
        "[{\"severity\":\"error\",\"message\":\"missing ';' at end of the declaration\",\
         \"fixMessage\":\"add ';'\",\"location\":{\"line\":0,\"column\":0}}]\n"
    );
}

#[test]
fn test_line_only_and_missing_location() {
    let mut diagnosis = Diagnosis::new();
    diagnosis.error(Entry::new("source line is unreadable").at_line(2));
    diagnosis.warning("source end not found");
    let text = render(&diagnosis);
    assert!(text.contains("\"location\":{\"line\":2,\"column\":null}"));
    assert!(text.contains("\"severity\":\"warning\",\"message\":\"source end not found\",\"fixMessage\":null,\"location\":null"));
    assert_eq!(text.matches("},{").count(), 1);
}
