//! Scout, interest, contract and invoice models -> entities

use rextrix_core::{Contract, DomainError, Interest, Invoice, Scout, Snowflake};

use super::parse_column;
use crate::models::{ContractModel, InterestModel, InvoiceModel, ScoutModel};

impl TryFrom<ScoutModel> for Scout {
    type Error = DomainError;

    fn try_from(model: ScoutModel) -> Result<Self, Self::Error> {
        Ok(Scout {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            recipient_id: Snowflake::new(model.recipient_id),
            title: model.title,
            message: model.message,
            status: parse_column("scout status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<InterestModel> for Interest {
    fn from(model: InterestModel) -> Self {
        Interest {
            liker_id: Snowflake::new(model.liker_id),
            target_id: Snowflake::new(model.target_id),
            created_at: model.created_at,
        }
    }
}

impl TryFrom<ContractModel> for Contract {
    type Error = DomainError;

    fn try_from(model: ContractModel) -> Result<Self, Self::Error> {
        Ok(Contract {
            id: Snowflake::new(model.id),
            company_id: Snowflake::new(model.company_id),
            cfo_id: Snowflake::new(model.cfo_id),
            scout_id: model.scout_id.map(Snowflake::new),
            monthly_fee: model.monthly_fee,
            start_date: model.start_date,
            end_date: model.end_date,
            status: parse_column("contract status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<InvoiceModel> for Invoice {
    type Error = DomainError;

    fn try_from(model: InvoiceModel) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: Snowflake::new(model.id),
            contract_id: Snowflake::new(model.contract_id),
            amount: model.amount,
            tax_amount: model.tax_amount,
            period_start: model.period_start,
            period_end: model.period_end,
            due_date: model.due_date,
            status: parse_column("invoice status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
