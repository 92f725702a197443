use nom::branch::alt;
use nom::combinator::{cut, map, opt};
use nom::error::{ContextError, ParseError};
use nom::sequence::preceded;
use nom::IResult;

use crate::engine::objects::Statement;

use super::common::{keyword, parse_identifier, parse_qualified_name};

pub(super) fn parse_show<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("show")(input)?;
    cut(alt((parse_show_tables, parse_show_schemas, parse_show_stats)))(input)
}

fn parse_show_tables<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("tables")(input)?;
    let (input, schema) = opt(preceded(keyword("from"), parse_identifier))(input)?;
    Ok((input, Statement::ShowTables { schema }))
}

fn parse_show_schemas<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    map(keyword("schemas"), |_| Statement::ShowSchemas)(input)
}

fn parse_show_stats<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("stats")(input)?;
    let (input, _) = keyword("for")(input)?;
    let (input, table) = parse_qualified_name(input)?;
    Ok((input, Statement::ShowStats { table }))
}

#[cfg(test)]
mod tests {
    use nom::error::VerboseError;

    use crate::engine::objects::{Ident, QualifiedName};

    use super::*;

    #[test]
    fn test_show_tables() -> Result<(), Box<dyn std::error::Error>> {
        let (output, value) = parse_show::<VerboseError<&str>>("show tables")?;
        assert_eq!(output.len(), 0);
        assert_eq!(value, Statement::ShowTables { schema: None });

        let (output, value) = parse_show::<VerboseError<&str>>("SHOW TABLES FROM public")?;
        assert_eq!(output.len(), 0);
        assert_eq!(
            value,
            Statement::ShowTables {
                schema: Some(Ident::new("public"))
            }
        );

        Ok(())
    }

    #[test]
    fn test_show_schemas() -> Result<(), Box<dyn std::error::Error>> {
        let (output, value) = parse_show::<VerboseError<&str>>("SHOW SCHEMAS")?;
        assert_eq!(output.len(), 0);
        assert_eq!(value, Statement::ShowSchemas);
        Ok(())
    }

    #[test]
    fn test_show_stats() -> Result<(), Box<dyn std::error::Error>> {
        let (output, value) = parse_show::<VerboseError<&str>>("SHOW STATS FOR public.orders")?;
        assert_eq!(output.len(), 0);
        assert_eq!(
            value,
            Statement::ShowStats {
                table: QualifiedName::of(&["public", "orders"])
            }
        );
        Ok(())
    }

    #[test]
    fn test_show_alone_is_an_error() {
        assert!(parse_show::<VerboseError<&str>>("show").is_err());
    }
}
