//! Account-level commands

use super::Paging;
use clap::Args;
use iamctl_core::request::{GetAccountSummaryRequest, ListAccountAliasesRequest};
use iamctl_core::response::{GetAccountSummaryResponse, ListAccountAliasesResponse, Paginated};
use iamctl_core::{IamCommand, Operation};
use std::collections::BTreeMap;

/// List the account alias
#[derive(Args, Debug, Clone)]
pub struct GetAccountAlias {
    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetAccountAlias {
    type Request = ListAccountAliasesRequest;
    type Response = ListAccountAliasesResponse;
    type Output = String;
    const OPERATION: Operation = Operation::ListAccountAliases;

    fn build_request(&self) -> ListAccountAliasesRequest {
        ListAccountAliasesRequest {
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListAccountAliasesResponse) -> Vec<String> {
        response.account_aliases.clone()
    }

    fn next_marker(response: &ListAccountAliasesResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }
}

/// Show entity usage and quotas for the account
#[derive(Args, Debug, Clone)]
pub struct GetAccountSummary {}

impl IamCommand for GetAccountSummary {
    type Request = GetAccountSummaryRequest;
    type Response = GetAccountSummaryResponse;
    type Output = BTreeMap<String, i32>;
    const OPERATION: Operation = Operation::GetAccountSummary;

    fn build_request(&self) -> GetAccountSummaryRequest {
        GetAccountSummaryRequest {}
    }

    fn project(&self, response: &GetAccountSummaryResponse) -> Vec<BTreeMap<String, i32>> {
        vec![response.summary_map.clone()]
    }
}
