//! Column names of the census sheet, matched case-sensitively.

pub const SSN: &str = "SSN";
pub const GENDER: &str = "Gender";
pub const MARITAL_STATUS_CODE: &str = "MaritalStatusCode";
pub const BIRTH_DATE: &str = "BirthDate";
pub const HIRE_DATE: &str = "HireDate";
pub const COUNTRY_CODE: &str = "CountryCode";
pub const EMPLOYEE_CELL_PHONE: &str = "EmployeeCellPhone";
pub const HOME_PHONE: &str = "HomePhone";
pub const STATUS: &str = "Status";
pub const LAST_STATUS_DATE: &str = "LastStatusDate";
pub const LOCATION_STATE_CODE: &str = "LocationStateCode";
pub const PAY_CYCLE: &str = "PayCycle";
pub const SALARIED: &str = "Salaried";
pub const HOURLY_RATE: &str = "HourlyRate";
pub const ANNUAL_PAY: &str = "AnnualPay";
pub const EMPLOYEE_BRANCH: &str = "EmployeeBranch";
pub const EMPLOYEE_BRANCH_CODE: &str = "EmployeeBranchCode";
pub const DIVISION_CODE: &str = "DivisionCode";
pub const CITY: &str = "City";
pub const STATE_CODE: &str = "StateCode";
pub const ZIP_CODE: &str = "ZipCode";

/// Fields the downstream census format expects but this source never fills.
/// They are emitted blank, last, in this order.
pub const PASSTHROUGH: [&str; 13] = [
    "MiddleName",
    "Suffix",
    "Address2",
    "Occupation",
    "DepartmentCode",
    "Department",
    "Division",
    "LocationCode",
    "Location",
    "NewHire",
    "NewHireEnrollByDate",
    "BenefitsCalcDate",
    "EffDateOverride",
];

/// Columns rendered with the date display format in the output sheet.
pub const DATE_COLUMNS: [&str; 3] = [HIRE_DATE, BIRTH_DATE, LAST_STATUS_DATE];
