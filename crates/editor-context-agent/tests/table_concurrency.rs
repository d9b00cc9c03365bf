use editor_context::{OffsetRange, Position, Range, selection_context};
use editor_context_agent::{AgentTextDocument, DocumentTable};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

const PATH: &str = "/repo/a.txt";
const UPDATES: usize = 2_000;

/// Version `n` has `n` characters on line 0 and the selection covers line 1.
fn version(n: usize) -> AgentTextDocument {
    AgentTextDocument::new(PATH)
        .with_content(format!("{}\nsel\ntail", "x".repeat(n)))
        .with_selection(Range::new(Position::new(1, 0), Position::new(1, 3)))
}

#[test]
fn test_readers_never_observe_a_mixed_snapshot() {
    let table = DocumentTable::default();
    table.document_opened(version(0), true);
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for n in 1..=UPDATES {
                table.document_changed(version(n));
            }
            done.store(true, Ordering::Release);
        });

        for _ in 0..4 {
            scope.spawn(|| {
                let mut last_generation = 0;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    let state = table.snapshot();
                    let document = state.document(Path::new(PATH)).unwrap();
                    let content = document.content().unwrap();
                    let first_line = content.find('\n').unwrap();

                    // Cached offsets belong to the content they are stored with.
                    assert_eq!(
                        document.selection().unwrap().offset,
                        Some(OffsetRange::new(first_line + 1, first_line + 4))
                    );
                    let ctx = selection_context(
                        &document.file_name(),
                        document.offsets(),
                        document.selection(),
                    )
                    .unwrap();
                    assert_eq!(ctx.selected_text, "sel");
                    assert_eq!(ctx.preceding_text.len(), first_line + 1);

                    // Updates are published in order.
                    assert!(document.generation() >= last_generation);
                    last_generation = document.generation();

                    if finished {
                        break;
                    }
                }
            });
        }
    });

    let state = table.snapshot();
    let document = state.document(Path::new(PATH)).unwrap();
    assert_eq!(document.content().unwrap().find('\n'), Some(UPDATES));
}
