use super::{
    Diagnostic, Error, InputNotResolvedDiagnostic, InputQueryDiagnostic, JsonRpcError,
    SearchSpaceDiagnostic,
};

pub trait PrettyError {
    fn pretty(&self) -> String;
}

impl PrettyError for Error {
    fn pretty(&self) -> String {
        match self {
            Error::RpcError(payload) => payload.pretty(),
            Error::HttpError(status, body) if body.is_empty() => {
                format!("Server responded with HTTP {status}.")
            }
            Error::HttpError(status, body) => {
                format!("Server responded with HTTP {status}: {body}")
            }
            Error::Timeout(_) => "The request timed out before the server answered.".to_string(),
            other => other.to_string(),
        }
    }
}

impl PrettyError for JsonRpcError {
    fn pretty(&self) -> String {
        if let Some(diagnostic) = self.diagnostic() {
            return diagnostic.pretty();
        }

        match &self.data {
            Some(data) => format!("Resolver error ({}): {}\n{}", self.code, self.message, data),
            None => format!("Resolver error ({}): {}", self.code, self.message),
        }
    }
}

impl PrettyError for Diagnostic {
    fn pretty(&self) -> String {
        match self {
            Diagnostic::UnsupportedTir(d) => format!(
                "Unsupported TIR version {}, the resolver expects {}.",
                d.provided, d.expected
            ),
            Diagnostic::MissingTxArg(d) => {
                format!("Missing argument `{}` of type {}.", d.key, d.ty)
            }
            Diagnostic::InputNotResolved(d) => d.pretty(),
            Diagnostic::TxScriptFailure(d) if d.logs.is_empty() => {
                "Tx script returned failure.".to_string()
            }
            Diagnostic::TxScriptFailure(d) => {
                format!("Tx script returned failure:\n  {}", d.logs.join("\n  "))
            }
        }
    }
}

impl PrettyError for InputNotResolvedDiagnostic {
    fn pretty(&self) -> String {
        format!(
            "Input not resolved: {} with {}, searched {}",
            self.name,
            self.query.pretty(),
            self.search_space.pretty()
        )
    }
}

impl PrettyError for InputQueryDiagnostic {
    fn pretty(&self) -> String {
        let flags = match (self.support_many, self.collateral) {
            (true, true) => " [many, collateral]",
            (true, false) => " [many]",
            (false, true) => " [collateral]",
            (false, false) => "",
        };

        let mut min_amount: Vec<String> = self
            .min_amount
            .iter()
            .map(|(asset, amount)| format!("{asset} = {amount}"))
            .collect();
        min_amount.sort();

        format!(
            "query(addr: {}, min: [{}], ref: [{}]{})",
            self.address.as_deref().unwrap_or("none"),
            min_amount.join(", "),
            self.refs.join(", "),
            flags
        )
    }
}

impl PrettyError for SearchSpaceDiagnostic {
    fn pretty(&self) -> String {
        fn count(x: Option<usize>) -> String {
            x.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
        }

        format!(
            "{} matched (by address: {}, by asset class: {}, by ref: {})",
            self.matched.len(),
            count(self.by_address_count),
            count(self.by_asset_class_count),
            count(self.by_ref_count)
        )
    }
}
