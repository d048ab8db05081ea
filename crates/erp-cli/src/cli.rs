use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use erp_core::Id;
use erp_queries::{Condition, Criterion, Literal, Operator, QueryOptions, SearchCriteria, SortSpec};

#[derive(Parser)]
#[command(name = "erp-cli")]
#[command(version, about = "Query the ERP REST API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API root URL
    #[arg(long, global = true, env = "ERP_API_URL")]
    pub base_url: Option<String>,

    /// Config file; `ERP__*` environment variables override its values
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the query string for the given options without calling the API
    QueryString(QueryArgs),

    /// List entities
    List {
        entity: Entity,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch one entity by id
    Get {
        entity: Entity,

        id: Id,

        /// Relations to expand
        #[arg(long)]
        expand: Option<String>,
    },

    /// Prefix search on one field
    Search {
        entity: Entity,

        field: String,

        prefix: String,

        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    SalesOrders,
    Firmdocs,
}

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    #[arg(long)]
    pub limit: Option<u64>,

    #[arg(long)]
    pub offset: Option<u64>,

    /// Comma-separated field names
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// `A,B` or `A,B:desc`
    #[arg(long)]
    pub sort: Option<String>,

    /// Filter such as `status=1`, `code~AB`, `total>=100` or `status=1|2`; repeatable
    #[arg(long = "where", value_name = "EXPR")]
    pub filters: Vec<String>,

    #[arg(long)]
    pub expand: Option<String>,

    /// Ask for the total row count
    #[arg(long)]
    pub count: bool,
}

impl QueryArgs {
    pub fn to_options(&self) -> Result<QueryOptions> {
        let mut options = QueryOptions::new();
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        if let Some(offset) = self.offset {
            options = options.offset(offset);
        }
        if !self.fields.is_empty() {
            options = options.fields(self.fields.iter().cloned());
        }
        if let Some(sort) = &self.sort {
            options = options.sort(SortSpec::parse(sort)?);
        }
        if let Some(expand) = &self.expand {
            options = options.expand(expand.as_str());
        }
        if self.count {
            options = options.with_count();
        }
        Ok(options.with_criteria(&parse_filters(&self.filters)?)?)
    }
}

/// Turn `--where` expressions into criteria; conditions on the same field are combined
pub fn parse_filters(filters: &[String]) -> Result<SearchCriteria> {
    let mut grouped: Vec<(String, Vec<Condition>)> = vec![];
    for raw in filters {
        let (field, condition) = parse_filter(raw)?;
        match grouped.iter_mut().find(|(f, _)| *f == field) {
            Some((_, conditions)) => conditions.push(condition),
            None => grouped.push((field, vec![condition])),
        }
    }

    let mut criteria = SearchCriteria::new();
    for (field, conditions) in grouped {
        criteria.insert(field, Criterion::Operators(conditions));
    }
    Ok(criteria)
}

pub fn parse_filter(raw: &str) -> Result<(String, Condition)> {
    let start = raw
        .find(|c| matches!(c, '=' | '!' | '<' | '>' | '~'))
        .ok_or_else(|| anyhow!("filter '{}' has no operator", raw))?;
    let field = raw[..start].trim();
    if field.is_empty() {
        bail!("filter '{}' names no field", raw);
    }

    let rest = &raw[start..];
    let (operator, value) = [
        ("!=", Operator::Ne),
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("=", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("~", Operator::Like),
    ]
    .into_iter()
    .find_map(|(token, op)| rest.strip_prefix(token).map(|value| (op, value.trim())))
    .ok_or_else(|| anyhow!("filter '{}' has an unknown operator", raw))?;

    let condition = match operator {
        Operator::Eq if value.contains('|') => Condition::is_in(value.split('|').map(|v| Literal::infer(v.trim()))),
        Operator::Like => Condition::like(value),
        op => Condition::new(op, Literal::infer(value)),
    };
    Ok((field.to_string(), condition))
}
