//! Command parsing and handlers.
//!
//! Every handler takes the raw arguments and the address book explicitly and
//! returns the text to print. Errors are turned into text by [`execute`], so
//! nothing a user types can end the session except `close` / `exit`.

use crate::domain::Phone;
use crate::error::{BookError, BookResult};
use crate::models::{AddressBook, PhoneEdit, Record, UPCOMING_BIRTHDAY_DAYS};
use chrono::NaiveDate;
use tracing::debug;

/// Commands understood by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Add,
    Change,
    Phone,
    RemovePhone,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    All,
    Delete,
    Help,
    Exit,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 12] = [
        Command::Hello,
        Command::Add,
        Command::Change,
        Command::Phone,
        Command::RemovePhone,
        Command::AddBirthday,
        Command::ShowBirthday,
        Command::Birthdays,
        Command::All,
        Command::Delete,
        Command::Help,
        Command::Exit,
    ];

    /// Resolve an already lower-cased command token.
    pub fn parse(token: &str) -> Option<Self> {
        let command = match token {
            "hello" => Self::Hello,
            "add" => Self::Add,
            "change" => Self::Change,
            "phone" => Self::Phone,
            "remove-phone" => Self::RemovePhone,
            "add-birthday" => Self::AddBirthday,
            "show-birthday" => Self::ShowBirthday,
            "birthdays" => Self::Birthdays,
            "all" => Self::All,
            "del" => Self::Delete,
            "help" => Self::Help,
            "close" | "exit" => Self::Exit,
            _ => return None,
        };
        Some(command)
    }

    /// Canonical command word.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Add => "add",
            Self::Change => "change",
            Self::Phone => "phone",
            Self::RemovePhone => "remove-phone",
            Self::AddBirthday => "add-birthday",
            Self::ShowBirthday => "show-birthday",
            Self::Birthdays => "birthdays",
            Self::All => "all",
            Self::Delete => "del",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Usage line shown by `help`.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Hello => "hello                          greet the assistant",
            Self::Add => "add <name> <phone>             add a contact or another phone",
            Self::Change => "change <name> <old> <new>      replace a phone number",
            Self::Phone => "phone <name>                   show a contact's phones",
            Self::RemovePhone => "remove-phone <name> <phone>    remove a phone number",
            Self::AddBirthday => "add-birthday <name> <DD.MM.YYYY>",
            Self::ShowBirthday => "show-birthday <name>           show a contact's birthday",
            Self::Birthdays => "birthdays                      birthdays in the coming week",
            Self::All => "all                            list every contact",
            Self::Delete => "del <name>                     delete a contact",
            Self::Help => "help                           show this list",
            Self::Exit => "close | exit                   save and quit",
        }
    }
}

/// What the command loop should do after a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and keep going.
    Reply(String),
    /// Nothing was entered.
    Empty,
    /// Print the text, save and stop.
    Exit(String),
}

/// Per-command inputs that do not come from the user's line.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub today: NaiveDate,
    pub birthday_window_days: i64,
}

impl CommandContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            birthday_window_days: UPCOMING_BIRTHDAY_DAYS,
        }
    }
}

/// Split a line into a lower-cased command token and its arguments.
///
/// Returns `None` for blank input.
pub fn parse_input(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?.to_lowercase();
    let args = parts.map(str::to_string).collect();
    Some((command, args))
}

/// Run one line of user input against the book.
pub fn execute(line: &str, book: &mut AddressBook, ctx: &CommandContext) -> Outcome {
    let Some((token, args)) = parse_input(line) else {
        return Outcome::Empty;
    };

    let Some(command) = Command::parse(&token) else {
        debug!(command = %token, "Unknown command");
        return Outcome::Reply("Invalid command.".to_string());
    };

    match dispatch(command, &args, book, ctx) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(command = command.name(), error = %e, "Command failed");
            Outcome::Reply(e.user_message())
        }
    }
}

/// Call the handler for `command`.
pub fn dispatch(
    command: Command,
    args: &[String],
    book: &mut AddressBook,
    ctx: &CommandContext,
) -> BookResult<Outcome> {
    let reply = match command {
        Command::Hello => hello(args),
        Command::Add => add_contact(args, book),
        Command::Change => change_contact(args, book),
        Command::Phone => show_phone(args, book),
        Command::RemovePhone => remove_phone(args, book),
        Command::AddBirthday => add_birthday(args, book),
        Command::ShowBirthday => show_birthday(args, book),
        Command::Birthdays => birthdays(args, book, ctx),
        Command::All => show_all(args, book),
        Command::Delete => delete_contact(args, book),
        Command::Help => help(args),
        Command::Exit => {
            expect_args::<0>(command, args)?;
            return Ok(Outcome::Exit("Good bye!".to_string()));
        }
    }?;
    Ok(Outcome::Reply(reply))
}

/// Check the argument count and borrow the arguments as an array.
fn expect_args<const N: usize>(command: Command, args: &[String]) -> BookResult<[&str; N]> {
    if args.len() != N {
        return Err(BookError::ArgumentCount {
            command: command.name().to_string(),
            expected: N,
            got: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

fn find_mut<'b>(book: &'b mut AddressBook, name: &str) -> BookResult<&'b mut Record> {
    book.find_mut(name).ok_or_else(|| BookError::NotFound(name.to_string()))
}

fn find<'b>(book: &'b AddressBook, name: &str) -> BookResult<&'b Record> {
    book.find(name).ok_or_else(|| BookError::NotFound(name.to_string()))
}

pub fn hello(args: &[String]) -> BookResult<String> {
    expect_args::<0>(Command::Hello, args)?;
    Ok("How can I help you?".to_string())
}

/// `add <name> <phone>`: new contact, or one more phone for an existing one.
pub fn add_contact(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name, phone] = expect_args::<2>(Command::Add, args)?;
    Phone::new(phone)?;

    if let Some(record) = book.find_mut(name) {
        record.add_phone(phone);
        return Ok("Phone added to existing contact.".to_string());
    }

    let mut record = Record::with_name(name)?;
    record.add_phone(phone);
    book.add(record);
    Ok("Contact added.".to_string())
}

/// `change <name> <old> <new>`
pub fn change_contact(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name, old_phone, new_phone] = expect_args::<3>(Command::Change, args)?;
    let record = find_mut(book, name)?;

    match record.edit_phone(old_phone, new_phone) {
        PhoneEdit::Replaced => Ok("Contact updated.".to_string()),
        PhoneEdit::NotFound => Err(BookError::PhoneNotFound {
            name: name.to_string(),
            phone: old_phone.to_string(),
        }),
        PhoneEdit::Rejected(e) => Err(e.into()),
    }
}

/// `phone <name>`
pub fn show_phone(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name] = expect_args::<1>(Command::Phone, args)?;
    let record = find(book, name)?;

    if record.phones().is_empty() {
        return Ok(format!("{} has no phone numbers.", name));
    }
    Ok(record.phones_display())
}

/// `remove-phone <name> <phone>`
pub fn remove_phone(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name, phone] = expect_args::<2>(Command::RemovePhone, args)?;
    find_mut(book, name)?.remove_phone(phone)?;
    Ok("Phone removed.".to_string())
}

/// `add-birthday <name> <DD.MM.YYYY>`
pub fn add_birthday(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name, birthday] = expect_args::<2>(Command::AddBirthday, args)?;
    find_mut(book, name)?.add_birthday(birthday)?;
    Ok("Birthday added.".to_string())
}

/// `show-birthday <name>`
pub fn show_birthday(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name] = expect_args::<1>(Command::ShowBirthday, args)?;
    let record = find(book, name)?;

    Ok(match record.birthday() {
        Some(birthday) => birthday.to_string(),
        None => format!("No birthday set for {}.", name),
    })
}

/// `birthdays`: who to congratulate in the configured window.
pub fn birthdays(
    args: &[String],
    book: &mut AddressBook,
    ctx: &CommandContext,
) -> BookResult<String> {
    expect_args::<0>(Command::Birthdays, args)?;
    let upcoming = book.upcoming_birthdays_within(ctx.today, ctx.birthday_window_days);

    if upcoming.is_empty() {
        return Ok("No upcoming birthdays found.".to_string());
    }

    let lines: Vec<String> = upcoming
        .iter()
        .filter_map(|record| {
            let birthday = record.birthday()?;
            let when = match birthday.days_until(ctx.today) {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            Some(format!("{}: {} ({})", record.name(), birthday, when))
        })
        .collect();
    Ok(lines.join("\n"))
}

/// `all`
pub fn show_all(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    expect_args::<0>(Command::All, args)?;
    if book.is_empty() {
        return Ok("Address book is empty.".to_string());
    }
    Ok(book.to_string())
}

/// `del <name>`
pub fn delete_contact(args: &[String], book: &mut AddressBook) -> BookResult<String> {
    let [name] = expect_args::<1>(Command::Delete, args)?;
    book.delete(name)
        .ok_or_else(|| BookError::NotFound(name.to_string()))?;
    Ok("Contact deleted.".to_string())
}

pub fn help(args: &[String]) -> BookResult<String> {
    expect_args::<0>(Command::Help, args)?;
    let lines: Vec<&str> = Command::ALL.iter().map(|c| c.usage()).collect();
    Ok(format!("Available commands:\n  {}", lines.join("\n  ")))
}
