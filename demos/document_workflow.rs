//! Document Approval Workflow
//!
//! This example demonstrates a multi-stage approval workflow driven by hooks.
//!
//! Key concepts:
//! - Multi-stage linear workflow (Draft -> Review -> Approved -> Published)
//! - `before_state` hooks validate the document before it enters a stage
//! - An unconditional `after` hook keeps an audit trail
//! - Rollback hooks undo partial work when a stage rejects the document
//!
//! Run with: RUST_LOG=switchyard=debug cargo run --example document_workflow

use parking_lot::Mutex;
use std::sync::Arc;
use switchyard::builder::MachineBuilder;
use switchyard::{state_enum, BoxError, Machine};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum DocState {
        Draft,
        Review,
        Approved,
        Published,
    }
    sentinel: Unfiled
}

struct Document {
    id: u64,
    word_count: usize,
}

type Shared<T> = Arc<Mutex<T>>;

fn check_length(doc: &Shared<Document>) -> Result<(), BoxError> {
    let word_count = doc.lock().word_count;
    if word_count < 100 {
        return Err(format!("only {word_count} words, need at least 100").into());
    }
    Ok(())
}

fn check_limit(doc: &Shared<Document>) -> Result<(), BoxError> {
    let word_count = doc.lock().word_count;
    if word_count > 5000 {
        return Err(format!("{word_count} words exceeds the 5000 word limit").into());
    }
    Ok(())
}

// The audit hook has already logged the aborted move by the time a stage
// rejects it.
fn withdraw(
    audit: Shared<Vec<String>>,
) -> impl Fn(&DocState, &DocState) -> Result<(), BoxError> + Send + Sync + 'static {
    move |from: &DocState, to: &DocState| {
        let mut trail = audit.lock();
        trail.pop();
        trail.push(format!("{from:?} -> {to:?} withdrawn"));
        Ok(())
    }
}

fn workflow(doc: Shared<Document>, audit: Shared<Vec<String>>) -> Machine<DocState> {
    let review_doc = Arc::clone(&doc);
    let approve_doc = Arc::clone(&doc);
    let trail = Arc::clone(&audit);

    MachineBuilder::new()
        .transition(DocState::Draft, DocState::Review)
        .transitions(DocState::Review, [DocState::Approved, DocState::Draft])
        .transition(DocState::Approved, DocState::Published)
        .after(move |from, to| {
            trail.lock().push(format!("{from:?} -> {to:?}"));
            Ok(())
        })
        .before_state(DocState::Review, move |_, _| check_length(&review_doc))
        .before_state(DocState::Approved, move |_, _| check_limit(&approve_doc))
        .on_rollback(DocState::Draft, withdraw(Arc::clone(&audit)))
        .on_rollback(DocState::Review, withdraw(audit))
        .initial(DocState::Draft)
        .build()
        .expect("workflow topology is valid")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Document Approval Workflow ===\n");

    let doc = Arc::new(Mutex::new(Document {
        id: 1,
        word_count: 40,
    }));
    let audit = Arc::new(Mutex::new(Vec::new()));
    let mut machine = workflow(Arc::clone(&doc), Arc::clone(&audit));

    let id = doc.lock().id;
    println!("Document {id} starts in {:?}", machine.state());

    println!("\nSubmitting a short draft:");
    if let Err(err) = machine.go_to(&DocState::Review) {
        println!("  rejected: {err}");
    }

    doc.lock().word_count = 6200;
    println!("\nExpanded to 6200 words and resubmitted:");
    machine.go_to(&DocState::Review).expect("draft -> review");
    println!("  now in {:?}", machine.state());

    println!("\nApproving an oversized document:");
    if let Err(err) = machine.go_to(&DocState::Approved) {
        println!("  rejected: {err}");
    }

    println!("\nSending it back to the author:");
    machine.go_to(&DocState::Draft).expect("review -> draft");
    doc.lock().word_count = 1200;
    machine.go_to(&DocState::Review).expect("draft -> review");
    machine.go_to(&DocState::Approved).expect("review -> approved");
    machine.go_to(&DocState::Published).expect("approved -> published");
    println!("  now in {:?}", machine.state());

    println!("\nPath taken: {:?}", machine.history().path());

    println!("\nAudit trail:");
    for entry in audit.lock().iter() {
        println!("  [Audit] Document {id}: {entry}");
    }

    println!("\n=== Example Complete ===");
}
