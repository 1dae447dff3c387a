//! Command line parsing for the prompt

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  search [query]              new search (current query when omitted)
  refine <field> <value>      add a value refinement
  range <field> <low> <high>  add a range refinement
  select <field> <index>      select a known refinement
  unrefine <field> <index>    deselect a refinement
  reset [field]               clear refinements
  page <n>                    go to page n
  size <n>                    change the page size
  sort <index>                pick a sort option
  collection <name>           switch collection
  more-refinements <field>    load all refinements of a navigation
  more-products <n>           append n products
  autocomplete <text>         suggestions for partial input
  details <id>                load one product
  count <collection>          record count in another collection
  show                        print the current results
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(Option<String>),
    Refine { field: String, value: String },
    Range { field: String, low: f64, high: f64 },
    Select { field: String, index: usize },
    Unrefine { field: String, index: usize },
    Reset(Option<String>),
    Page(u64),
    Size(u64),
    Sort(usize),
    Collection(String),
    MoreRefinements(String),
    MoreProducts(u64),
    Autocomplete(String),
    Details(String),
    Count(String),
    Show,
    Help,
    Quit,
}

fn number<T>(word: Option<&str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let word = word.ok_or_else(|| anyhow!("missing {}", what))?;
    word.parse()
        .with_context(|| format!("'{}' is not a valid {}", word, what))
}

fn word(word: Option<&str>, what: &str) -> Result<String> {
    word.map(str::to_string)
        .ok_or_else(|| anyhow!("missing {}", what))
}

/// The rest of the line after the command word, if not blank
fn rest(line: &str) -> Option<String> {
    line.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|rest| !rest.is_empty())
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };

        let command = match name {
            "search" | "s" => Command::Search(rest(line)),
            "refine" => {
                let field = word(words.next(), "field")?;
                let value = rest(line)
                    .and_then(|rest| rest.strip_prefix(field.as_str()).map(|v| v.trim().to_string()))
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| anyhow!("missing value"))?;
                Command::Refine { field, value }
            }
            "range" => Command::Range {
                field: word(words.next(), "field")?,
                low: number(words.next(), "low bound")?,
                high: number(words.next(), "high bound")?,
            },
            "select" => Command::Select {
                field: word(words.next(), "field")?,
                index: number(words.next(), "index")?,
            },
            "unrefine" => Command::Unrefine {
                field: word(words.next(), "field")?,
                index: number(words.next(), "index")?,
            },
            "reset" => Command::Reset(words.next().map(str::to_string)),
            "page" => Command::Page(number(words.next(), "page")?),
            "size" => Command::Size(number(words.next(), "page size")?),
            "sort" => Command::Sort(number(words.next(), "sort index")?),
            "collection" => Command::Collection(word(words.next(), "collection")?),
            "more-refinements" => Command::MoreRefinements(word(words.next(), "field")?),
            "more-products" => Command::MoreProducts(number(words.next(), "amount")?),
            "autocomplete" | "ac" => Command::Autocomplete(rest(line).unwrap_or_default()),
            "details" => Command::Details(word(words.next(), "product id")?),
            "count" => Command::Count(word(words.next(), "collection")?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_search() {
        assert_eq!(
            "search red shoes".parse::<Command>().unwrap(),
            Command::Search(Some("red shoes".to_string()))
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(None));
    }

    #[test]
    fn test_parse_refinements() {
        assert_eq!(
            "refine brand New Balance".parse::<Command>().unwrap(),
            Command::Refine {
                field: "brand".to_string(),
                value: "New Balance".to_string()
            }
        );
        assert_eq!(
            "range price 10 20.5".parse::<Command>().unwrap(),
            Command::Range {
                field: "price".to_string(),
                low: 10.0,
                high: 20.5
            }
        );
        assert_eq!("reset".parse::<Command>().unwrap(), Command::Reset(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!("refine brand".parse::<Command>().is_err());
        assert!("page two".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }
}
