use super::super::traits::{quote_with, Pagination, ReturningStyle, SqlGenerator};
use super::{compile_args, resolve, Builtin, DatePart};
use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

pub struct SqlServerGenerator;

impl SqlGenerator for SqlServerGenerator {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '[', ']')
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Output
    }

    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        let Some(builtin) = resolve(self.name(), name, args)? else {
            return c.call(name, args);
        };

        Ok(match builtin {
            Builtin::Length => format!("len({})", c.parameter(&args[0], false)?),
            Builtin::Substr if args.len() == 3 => {
                format!("substring({})", compile_args(c, args)?.join(", "))
            }
            Builtin::Substr => {
                // substring() needs a length; the whole string is enough
                let text = c.parameter(&args[0], false)?;
                let start = c.parameter(&args[1], false)?;
                let len = c.parameter(&args[0], false)?;
                format!("substring({}, {}, len({}))", text, start, len)
            }
            Builtin::Trim => format!("rtrim(ltrim({}))", c.parameter(&args[0], false)?),
            Builtin::Strpos => {
                let needle = c.parameter(&args[1], false)?;
                let haystack = c.parameter(&args[0], false)?;
                format!("charindex({}, {})", needle, haystack)
            }
            Builtin::Repeat => format!("replicate({})", compile_args(c, args)?.join(", ")),
            Builtin::Rand => "rand()".to_string(),
            Builtin::Now => "cast(getdate() as datetime2(0))".to_string(),
            Builtin::Utc => "cast(getutcdate() as datetime2(0))".to_string(),
            Builtin::Today => "cast(getdate() as date)".to_string(),
            Builtin::CurrentTime => "cast(getdate() as time(0))".to_string(),
            Builtin::Date => format!("cast({} as date)", c.parameter(&args[0], false)?),
            Builtin::Time => format!("cast({} as time(0))", c.parameter(&args[0], false)?),
            Builtin::Part(part @ (DatePart::Hour | DatePart::Minute | DatePart::Second)) => {
                format!(
                    "datepart({}, {})",
                    part.as_str(),
                    c.parameter(&args[0], false)?
                )
            }
            _ => c.call(name, args)?,
        })
    }

    /// A bare limit becomes `top (?)` in the select clause.
    fn select_top(
        &self,
        c: &mut Compiler<'_>,
        page: &Pagination<'_>,
    ) -> CompileResult<Option<String>> {
        match (page.limit, page.offset) {
            (Some(limit), None) if page.allow_top => {
                Ok(Some(format!("top ({})", c.parameter(limit, false)?)))
            }
            _ => Ok(None),
        }
    }

    /// `offset .. rows [fetch next .. rows only]`, which T-SQL only accepts
    /// after an `order by`.
    fn limit_offset(
        &self,
        c: &mut Compiler<'_>,
        page: &Pagination<'_>,
    ) -> CompileResult<Option<String>> {
        if page.offset.is_none() && page.allow_top {
            return Ok(None);
        }

        let mut sql = String::new();
        if !page.ordered {
            sql.push_str("order by (select 0) ");
        }
        match page.offset {
            Some(offset) => sql.push_str(&format!("offset {} rows", c.parameter(offset, false)?)),
            None => sql.push_str("offset 0 rows"),
        }
        if let Some(limit) = page.limit {
            sql.push_str(&format!(" fetch next {} rows only", c.parameter(limit, false)?));
        }
        Ok(Some(sql))
    }
}
