use nom::branch::alt;
use nom::combinator::cut;
use nom::error::{ContextError, ParseError};
use nom::IResult;

use crate::engine::objects::Statement;

use super::common::{keyword, parse_identifier};
use super::{parse_statement, ParsingOptions};

pub(super) fn parse_explain<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("explain")(input)?;
    let (input, statement) = cut(|i| parse_statement(i, options))(input)?;
    Ok((
        input,
        Statement::Explain {
            statement: Box::new(statement),
        },
    ))
}

pub(super) fn parse_describe<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("describe")(input)?;
    cut(alt((parse_describe_input, parse_describe_output)))(input)
}

fn parse_describe_input<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("input")(input)?;
    let (input, name) = parse_identifier(input)?;
    Ok((input, Statement::DescribeInput { name }))
}

fn parse_describe_output<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("output")(input)?;
    let (input, name) = parse_identifier(input)?;
    Ok((input, Statement::DescribeOutput { name }))
}

#[cfg(test)]
mod tests {
    use nom::error::VerboseError;

    use crate::engine::objects::Ident;

    use super::*;

    #[test]
    fn test_explain_wraps_inner_statement() -> Result<(), Box<dyn std::error::Error>> {
        let options = ParsingOptions::default();
        let (output, value) = parse_explain::<VerboseError<&str>>("EXPLAIN SHOW SCHEMAS", &options)?;
        assert_eq!(output.len(), 0);
        assert_eq!(
            value,
            Statement::Explain {
                statement: Box::new(Statement::ShowSchemas)
            }
        );
        Ok(())
    }

    #[test]
    fn test_describe_input_and_output() -> Result<(), Box<dyn std::error::Error>> {
        let (output, value) = parse_describe::<VerboseError<&str>>("DESCRIBE INPUT my_query")?;
        assert_eq!(output.len(), 0);
        assert_eq!(
            value,
            Statement::DescribeInput {
                name: Ident::new("my_query")
            }
        );

        let (output, value) = parse_describe::<VerboseError<&str>>("describe output my_query")?;
        assert_eq!(output.len(), 0);
        assert_eq!(
            value,
            Statement::DescribeOutput {
                name: Ident::new("my_query")
            }
        );

        Ok(())
    }
}
