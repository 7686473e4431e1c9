//! The interactive read-eval-print loop.
//!
//! The loop owns the address book for the length of one session: it is
//! loaded from the store when the session starts and saved exactly once when
//! the user leaves with `close`/`exit` or the input ends.

use crate::commands::{execute, CommandContext, Outcome};
use crate::error::SessionResult;
use crate::models::{AddressBook, UPCOMING_BIRTHDAY_DAYS};
use crate::storage::AddressBookStore;
use chrono::{Local, NaiveDate};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

pub const WELCOME: &str = "Welcome to the assistant bot!";
pub const PROMPT: &str = "Enter a command: ";

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// One interactive session over an input and an output stream.
pub struct Repl<'s> {
    store: &'s dyn AddressBookStore,
    birthday_window_days: i64,
    clock: Box<dyn Fn() -> NaiveDate + 's>,
}

impl<'s> Repl<'s> {
    pub fn new(store: &'s dyn AddressBookStore) -> Self {
        Self {
            store,
            birthday_window_days: UPCOMING_BIRTHDAY_DAYS,
            clock: Box::new(local_today),
        }
    }

    /// Look this many days ahead for `birthdays`.
    pub fn with_birthday_window(mut self, days: i64) -> Self {
        self.birthday_window_days = days;
        self
    }

    /// Replace the source of "today", read once per command.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + 's) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run until `close`/`exit` or end of input, then save.
    ///
    /// Returns the book as it was saved. The book is saved even when the
    /// terminal streams fail part way through.
    ///
    /// # Errors
    ///
    /// Fails only when the streams or the final save fail.
    pub fn run<R, W>(&self, mut input: R, mut output: W) -> SessionResult<AddressBook>
    where
        R: BufRead,
        W: Write,
    {
        let mut book = self.store.load();
        info!(contacts = book.len(), "Session started");

        let conversation = self.converse(&mut input, &mut output, &mut book);
        if let Err(e) = &conversation {
            error!(error = %e, "Terminal I/O failed, saving and stopping");
        }

        self.store.save(&book)?;
        info!(contacts = book.len(), "Session finished");

        conversation?;
        Ok(book)
    }

    /// Prompt, read and answer until the user leaves or input ends.
    fn converse<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        book: &mut AddressBook,
    ) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "{}", WELCOME)?;

        let mut buf = Vec::new();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                info!("End of input");
                writeln!(output)?;
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("Input line was not valid UTF-8");
            }

            let ctx = CommandContext {
                today: (self.clock)(),
                birthday_window_days: self.birthday_window_days,
            };

            match execute(&line, book, &ctx) {
                Outcome::Reply(text) => writeln!(output, "{}", text)?,
                Outcome::Empty => {}
                Outcome::Exit(text) => {
                    writeln!(output, "{}", text)?;
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SessionError, StorageError, StorageResult};
    use std::cell::{Cell, RefCell};
    use std::io::Cursor;

    #[derive(Default)]
    struct MemoryStore {
        initial: AddressBook,
        saved: RefCell<Vec<AddressBook>>,
    }

    impl AddressBookStore for MemoryStore {
        fn load(&self) -> AddressBook {
            self.initial.clone()
        }

        fn save(&self, book: &AddressBook) -> StorageResult<()> {
            self.saved.borrow_mut().push(book.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl AddressBookStore for FailingStore {
        fn load(&self) -> AddressBook {
            AddressBook::new()
        }

        fn save(&self, _book: &AddressBook) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn session(store: &dyn AddressBookStore, script: &str) -> (SessionResult<AddressBook>, String) {
        session_bytes(store, script.as_bytes())
    }

    fn session_bytes(
        store: &dyn AddressBookStore,
        script: &[u8],
    ) -> (SessionResult<AddressBook>, String) {
        let mut output = Vec::new();
        let result = Repl::new(store)
            .with_clock(june_10)
            .run(Cursor::new(script.to_vec()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    // Accepts `limit` bytes, then fails every write.
    struct BrokenPipe {
        limit: usize,
        written: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
            }
            self.written += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_session_saves_once_on_exit() {
        let store = MemoryStore::default();
        let (result, output) = session(&store, "add John 1234567890\nexit\nadd Jane 1111111111\n");

        let book = result.unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(store.saved.borrow().len(), 1);
        assert_eq!(store.saved.borrow()[0], book);
        assert!(output.starts_with(WELCOME));
        assert!(output.contains("Contact added."));
        assert!(output.contains("Good bye!"));
        assert!(!output.contains("Jane"));
    }

    #[test]
    fn test_session_saves_on_end_of_input() {
        let store = MemoryStore::default();
        let (result, _) = session(&store, "add John 1234567890\n");

        assert!(result.unwrap().contains("John"));
        assert_eq!(store.saved.borrow().len(), 1);
    }

    #[test]
    fn test_session_starts_from_loaded_book() {
        let mut initial = AddressBook::new();
        let mut record = crate::models::Record::with_name("John").unwrap();
        record.add_phone("1234567890");
        initial.add(record);

        let store = MemoryStore {
            initial,
            ..Default::default()
        };
        let (_, output) = session(&store, "phone John\nclose\n");
        assert!(output.contains("1234567890"));
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let store = MemoryStore::default();
        let script = "add John 123\nphone John\nbogus\n\nadd John 1234567890\nphone John\nexit\n";
        let (result, output) = session(&store, script);

        assert_eq!(result.unwrap().len(), 1);
        assert!(output.contains("You did not specify"));
        assert!(output.contains("Contact not found: John"));
        assert!(output.contains("Invalid command."));
        assert!(output.ends_with("Good bye!\n"));
    }

    #[test]
    fn test_clock_is_read_per_command() {
        let store = MemoryStore::default();
        let calls = Cell::new(0);
        let mut output = Vec::new();

        Repl::new(&store)
            .with_clock(|| {
                calls.set(calls.get() + 1);
                june_10()
            })
            .run(Cursor::new("hello\nhello\nexit\n"), &mut output)
            .unwrap();

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_birthday_window_is_applied() {
        let store = MemoryStore::default();
        let mut output = Vec::new();
        Repl::new(&store)
            .with_clock(june_10)
            .with_birthday_window(10)
            .run(
                Cursor::new("add Bob 2222222222\nadd-birthday Bob 20.06.1990\nbirthdays\nexit\n"),
                &mut output,
            )
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Bob: 20.06.1990 (in 10 days)"));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let (result, output) = session(&FailingStore, "exit\n");
        assert!(matches!(
            result,
            Err(SessionError::Storage(StorageError::Io(_)))
        ));
        assert!(output.contains("Good bye!"));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_the_session() {
        let store = MemoryStore::default();
        let (result, output) = session_bytes(
            &store,
            b"add John 1234567890\nphone \xff\xfe\nadd Jane 1111111111\nexit\n",
        );

        let book = result.unwrap();
        assert!(book.contains("John"));
        assert!(book.contains("Jane"));
        assert_eq!(store.saved.borrow().len(), 1);
        assert!(output.contains("Contact not found: \u{FFFD}\u{FFFD}"));
        assert!(output.ends_with("Good bye!\n"));
    }

    #[test]
    fn test_invalid_utf8_command_token_is_rejected() {
        let store = MemoryStore::default();
        let (result, output) = session_bytes(&store, b"\xffadd John 1234567890\nexit\n");

        assert!(result.unwrap().is_empty());
        assert!(output.contains("Invalid command."));
    }

    #[test]
    fn test_broken_output_still_saves() {
        let store = MemoryStore::default();
        let output = BrokenPipe {
            limit: WELCOME.len() + 1 + PROMPT.len(),
            written: 0,
        };

        let result = Repl::new(&store)
            .with_clock(june_10)
            .run(Cursor::new("add John 1234567890\nexit\n"), output);

        assert!(matches!(result, Err(SessionError::Stream(_))));
        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].contains("John"));
    }
}
