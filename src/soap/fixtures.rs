//! Response bodies shared by unit tests

use std::fmt::Write;

pub const SINGLE_WORKER: &str = include_str!("../../tests/fixtures/workers_page_single.xml");
pub const MANY_WORKERS: &str = include_str!("../../tests/fixtures/workers_page_many.xml");
pub const SOAP_FAULT: &str = include_str!("../../tests/fixtures/soap_fault.xml");

/// A minimal Get_Workers response
///
/// `total_pages` is written verbatim so tests can pass non-numbers; `None`
/// leaves the element out.
pub fn workers_page(total_pages: Option<&str>, worker_ids: &[&str]) -> String {
    let mut results = String::new();
    if let Some(total) = total_pages {
        write!(results, "<wd:Total_Pages>{total}</wd:Total_Pages>").unwrap();
    }

    let mut workers = String::new();
    for id in worker_ids {
        write!(
            workers,
            "<wd:Worker><wd:Worker_Data><wd:Worker_ID>{id}</wd:Worker_ID>\
             <wd:User_ID>user{id}</wd:User_ID></wd:Worker_Data></wd:Worker>"
        )
        .unwrap();
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <wd:Get_Workers_Response xmlns:wd="urn:com.workday/bsvc">
      <wd:Response_Results>{results}</wd:Response_Results>
      <wd:Response_Data>{workers}</wd:Response_Data>
    </wd:Get_Workers_Response>
  </env:Body>
</env:Envelope>"#
    )
}
