use carrylist::List;
use carrylist::add;
use expect_test::expect;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::Event;
use tracing::Subscriber;
use tracing::field::Field;
use tracing::field::Visit;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Default)]
struct Events(Arc<Mutex<Vec<String>>>);

#[derive(Default)]
struct Record {
  message: String,
  fields: String,
}

impl Visit for Record {
  fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
    if field.name() == "message" {
      self.message = format!("{:?}", value);
    } else {
      self.fields.push_str(&format!(" {}={:?}", field.name(), value));
    }
  }
}

impl<S: Subscriber> Layer<S> for Events {
  fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
    let mut record = Record::default();
    event.record(&mut record);
    self.0.lock().unwrap().push(format!("{}{}", record.message, record.fields));
  }
}

#[test]
fn test_entry_paths_are_traced() {
  let events = Events::default();
  let subscriber = Registry::default().with(events.clone());

  let x = List::from_digits(&[4, 5]).unwrap();
  let y = List::from_digits(&[1]).unwrap();
  let e = List::new();

  tracing::subscriber::with_default(subscriber, || {
    let _ = add(&e, &e);
    let _ = add(&x, &e);
    let _ = add(&e, &y);
    let _ = add(&x, &y);
  });

  let log = events.0.lock().unwrap().join("; ");

  expect!["both operands empty; right operand empty, copying left len=2; left operand empty, copying right len=1; adding digit lists lhs=2 rhs=1"]
    .assert_eq(&log);
}
