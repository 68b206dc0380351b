//! IRRDBU00 security-unload record layouts
//!
//! Field positions follow the IBM record-format documentation convention:
//! 1-based start columns with a single separator byte between fields. The
//! helper constructors take those 1-based starts and store 0-based offsets.
//!
//! Two record types carry a second version: `0100` (GPBD) gained the
//! UNIVERSAL attribute and `0200` (USBD) gained the password-phrase, KDFAES,
//! and MFA fields in later releases. Older-format records select the shorter
//! layout by length.

use super::{FieldDef, FieldKind, FieldLen, FlagCoding, ScalarKind, Schema, SchemaKey};
use crate::app::models::RecordFamily;

const fn key(type_code: &'static str, version: u8) -> SchemaKey {
    SchemaKey {
        family: RecordFamily::SecurityUnload,
        type_code,
        version,
    }
}

const fn field(name: &'static str, start: usize, len: usize, kind: ScalarKind) -> FieldDef {
    FieldDef {
        name,
        offset: start - 1,
        len: FieldLen::Fixed(len),
        kind: FieldKind::Scalar(kind),
    }
}

const fn txt(name: &'static str, start: usize, len: usize) -> FieldDef {
    field(name, start, len, ScalarKind::FixedText)
}

const fn num(name: &'static str, start: usize, len: usize) -> FieldDef {
    field(name, start, len, ScalarKind::Number)
}

const fn date(name: &'static str, start: usize) -> FieldDef {
    field(name, start, crate::constants::SECURITY_DATE_LEN, ScalarKind::Date)
}

const fn yes_no(name: &'static str, start: usize) -> FieldDef {
    field(name, start, 4, ScalarKind::Flag(FlagCoding::YesNo))
}

// ---------------------------------------------------------------------------
// Group records
// ---------------------------------------------------------------------------

/// Group basic data, base layout
const GPBD_V1: &[FieldDef] = &[
    txt("GPBD_RECORD_TYPE", 1, 4),
    txt("GPBD_NAME", 6, 8),
    txt("GPBD_SUPGRP_ID", 15, 8),
    date("GPBD_CREATE_DATE", 24),
    txt("GPBD_OWNER_ID", 35, 8),
    txt("GPBD_UACC", 44, 8),
    yes_no("GPBD_NOTERMUACC", 53),
    txt("GPBD_INSTALL_DATA", 58, 255),
    txt("GPBD_MODEL", 314, 44),
];

/// Group basic data, with the UNIVERSAL attribute
const GPBD_V2: &[FieldDef] = &[
    txt("GPBD_RECORD_TYPE", 1, 4),
    txt("GPBD_NAME", 6, 8),
    txt("GPBD_SUPGRP_ID", 15, 8),
    date("GPBD_CREATE_DATE", 24),
    txt("GPBD_OWNER_ID", 35, 8),
    txt("GPBD_UACC", 44, 8),
    yes_no("GPBD_NOTERMUACC", 53),
    txt("GPBD_INSTALL_DATA", 58, 255),
    txt("GPBD_MODEL", 314, 44),
    yes_no("GPBD_UNIVERSAL", 359),
];

const GPSGRP: &[FieldDef] = &[
    txt("GPSGRP_RECORD_TYPE", 1, 4),
    txt("GPSGRP_NAME", 6, 8),
    txt("GPSGRP_SUBGRP_ID", 15, 8),
];

const GPMEM: &[FieldDef] = &[
    txt("GPMEM_RECORD_TYPE", 1, 4),
    txt("GPMEM_NAME", 6, 8),
    txt("GPMEM_MEMBER_ID", 15, 8),
    txt("GPMEM_AUTH", 24, 8),
];

const GPINSTD: &[FieldDef] = &[
    txt("GPINSTD_RECORD_TYPE", 1, 4),
    txt("GPINSTD_NAME", 6, 8),
    txt("GPINSTD_USR_NAME", 15, 8),
    txt("GPINSTD_USR_DATA", 24, 255),
    txt("GPINSTD_USR_FLAG", 280, 2),
];

const GPDFP: &[FieldDef] = &[
    txt("GPDFP_RECORD_TYPE", 1, 4),
    txt("GPDFP_NAME", 6, 8),
    txt("GPDFP_DATAAPPL", 15, 8),
    txt("GPDFP_DATACLAS", 24, 8),
    txt("GPDFP_MGMTCLAS", 33, 8),
    txt("GPDFP_STORCLAS", 42, 8),
];

const GPOMVS: &[FieldDef] = &[
    txt("GPOMVS_RECORD_TYPE", 1, 4),
    txt("GPOMVS_NAME", 6, 8),
    num("GPOMVS_GID", 15, 10),
];

const GPTME: &[FieldDef] = &[
    txt("GPTME_RECORD_TYPE", 1, 4),
    txt("GPTME_NAME", 6, 8),
    txt("GPTME_ROLE", 15, 246),
];

const GPCSD: &[FieldDef] = &[
    txt("GPCSD_RECORD_TYPE", 1, 4),
    txt("GPCSD_NAME", 6, 8),
    txt("GPCSD_TYPE", 15, 5),
    txt("GPCSD_KEY", 21, 8),
    txt("GPCSD_VALUE", 30, 255),
];

// ---------------------------------------------------------------------------
// User records
// ---------------------------------------------------------------------------

/// User basic data, base layout (through the default security label)
const USBD_V1: &[FieldDef] = &[
    txt("USBD_RECORD_TYPE", 1, 4),
    txt("USBD_NAME", 6, 8),
    date("USBD_CREATE_DATE", 15),
    txt("USBD_OWNER_ID", 26, 8),
    yes_no("USBD_ADSP", 35),
    yes_no("USBD_SPECIAL", 40),
    yes_no("USBD_OPER", 45),
    yes_no("USBD_REVOKE", 50),
    yes_no("USBD_GRPACC", 55),
    num("USBD_PWD_INTERVAL", 60, 3),
    date("USBD_PWD_DATE", 64),
    txt("USBD_PROGRAMMER", 75, 20),
    txt("USBD_DEFGRP_ID", 96, 8),
    txt("USBD_LASTJOB_TIME", 105, 8),
    date("USBD_LASTJOB_DATE", 114),
    txt("USBD_INSTALL_DATA", 125, 255),
    yes_no("USBD_UAUDIT", 381),
    yes_no("USBD_AUDITOR", 386),
    txt("USBD_NOPWD", 391, 3),
    yes_no("USBD_OIDCARD", 395),
    num("USBD_PWD_GEN", 400, 3),
    num("USBD_REVOKE_CNT", 404, 3),
    txt("USBD_MODEL", 408, 44),
    num("USBD_SECLEVEL", 453, 3),
    date("USBD_REVOKE_DATE", 457),
    date("USBD_RESUME_DATE", 468),
    yes_no("USBD_ACCESS_SUN", 479),
    yes_no("USBD_ACCESS_MON", 484),
    yes_no("USBD_ACCESS_TUE", 489),
    yes_no("USBD_ACCESS_WED", 494),
    yes_no("USBD_ACCESS_THU", 499),
    yes_no("USBD_ACCESS_FRI", 504),
    yes_no("USBD_ACCESS_SAT", 509),
    txt("USBD_START_TIME", 514, 8),
    txt("USBD_END_TIME", 523, 8),
    txt("USBD_SECLABEL", 532, 8),
];

/// User basic data, with password-phrase, KDFAES, and MFA fields
const USBD_V2: &[FieldDef] = &[
    txt("USBD_RECORD_TYPE", 1, 4),
    txt("USBD_NAME", 6, 8),
    date("USBD_CREATE_DATE", 15),
    txt("USBD_OWNER_ID", 26, 8),
    yes_no("USBD_ADSP", 35),
    yes_no("USBD_SPECIAL", 40),
    yes_no("USBD_OPER", 45),
    yes_no("USBD_REVOKE", 50),
    yes_no("USBD_GRPACC", 55),
    num("USBD_PWD_INTERVAL", 60, 3),
    date("USBD_PWD_DATE", 64),
    txt("USBD_PROGRAMMER", 75, 20),
    txt("USBD_DEFGRP_ID", 96, 8),
    txt("USBD_LASTJOB_TIME", 105, 8),
    date("USBD_LASTJOB_DATE", 114),
    txt("USBD_INSTALL_DATA", 125, 255),
    yes_no("USBD_UAUDIT", 381),
    yes_no("USBD_AUDITOR", 386),
    txt("USBD_NOPWD", 391, 3),
    yes_no("USBD_OIDCARD", 395),
    num("USBD_PWD_GEN", 400, 3),
    num("USBD_REVOKE_CNT", 404, 3),
    txt("USBD_MODEL", 408, 44),
    num("USBD_SECLEVEL", 453, 3),
    date("USBD_REVOKE_DATE", 457),
    date("USBD_RESUME_DATE", 468),
    yes_no("USBD_ACCESS_SUN", 479),
    yes_no("USBD_ACCESS_MON", 484),
    yes_no("USBD_ACCESS_TUE", 489),
    yes_no("USBD_ACCESS_WED", 494),
    yes_no("USBD_ACCESS_THU", 499),
    yes_no("USBD_ACCESS_FRI", 504),
    yes_no("USBD_ACCESS_SAT", 509),
    txt("USBD_START_TIME", 514, 8),
    txt("USBD_END_TIME", 523, 8),
    txt("USBD_SECLABEL", 532, 8),
    txt("USBD_ATTRIBS", 541, 8),
    yes_no("USBD_PWDENV_EXISTS", 550),
    yes_no("USBD_PWD_ASIS", 555),
    date("USBD_PHR_DATE", 560),
    num("USBD_PHR_GEN", 571, 3),
    num("USBD_CERT_SEQN", 575, 10),
    yes_no("USBD_PPHENV_EXISTS", 586),
    txt("USBD_PWD_ALG", 591, 8),
    num("USBD_LEG_PWDHIST_CT", 600, 3),
    num("USBD_XPW_PWDHIST_CT", 604, 3),
    txt("USBD_PHR_ALG", 608, 8),
    num("USBD_LEG_PHRHIST_CT", 617, 3),
    num("USBD_XPW_PHRHIST_CT", 621, 3),
    yes_no("USBD_ROAUDIT", 625),
    yes_no("USBD_MFA_FALLBACK", 630),
    num("USBD_PHR_INTERVAL", 635, 3),
];

const USCAT: &[FieldDef] = &[
    txt("USCAT_RECORD_TYPE", 1, 4),
    txt("USCAT_NAME", 6, 8),
    num("USCAT_CATEGORY", 15, 5),
];

const USCLA: &[FieldDef] = &[
    txt("USCLA_RECORD_TYPE", 1, 4),
    txt("USCLA_NAME", 6, 8),
    txt("USCLA_CLASS", 15, 8),
];

const USGCON: &[FieldDef] = &[
    txt("USGCON_RECORD_TYPE", 1, 4),
    txt("USGCON_NAME", 6, 8),
    txt("USGCON_GRP_ID", 15, 8),
    date("USGCON_CONNECT_DATE", 24),
    txt("USGCON_OWNER_ID", 35, 8),
    txt("USGCON_LASTCON_TIME", 44, 8),
    date("USGCON_LASTCON_DATE", 53),
    txt("USGCON_UACC", 64, 8),
    num("USGCON_INIT_CNT", 73, 5),
];

const USINSTD: &[FieldDef] = &[
    txt("USINSTD_RECORD_TYPE", 1, 4),
    txt("USINSTD_NAME", 6, 8),
    txt("USINSTD_USR_NAME", 15, 8),
    txt("USINSTD_USR_DATA", 24, 255),
    txt("USINSTD_USR_FLAG", 280, 2),
];

const USCON: &[FieldDef] = &[
    txt("USCON_RECORD_TYPE", 1, 4),
    txt("USCON_GRP_ID", 6, 8),
    txt("USCON_NAME", 15, 8),
    date("USCON_CONNECT_DATE", 24),
    txt("USCON_OWNER_ID", 35, 8),
    txt("USCON_LASTCON_TIME", 44, 8),
    date("USCON_LASTCON_DATE", 53),
    txt("USCON_UACC", 64, 8),
    num("USCON_INIT_CNT", 73, 5),
    yes_no("USCON_GRP_ADSP", 79),
    yes_no("USCON_GRP_SPECIAL", 84),
    yes_no("USCON_GRP_OPER", 89),
    yes_no("USCON_GRP_REVOKE", 94),
    yes_no("USCON_GRP_GRPACC", 99),
    date("USCON_REVOKE_DATE", 104),
    date("USCON_RESUME_DATE", 115),
];

const USDFP: &[FieldDef] = &[
    txt("USDFP_RECORD_TYPE", 1, 4),
    txt("USDFP_NAME", 6, 8),
    txt("USDFP_DATAAPPL", 15, 8),
    txt("USDFP_DATACLAS", 24, 8),
    txt("USDFP_MGMTCLAS", 33, 8),
    txt("USDFP_STORCLAS", 42, 8),
];

const USTSO: &[FieldDef] = &[
    txt("USTSO_RECORD_TYPE", 1, 4),
    txt("USTSO_NAME", 6, 8),
    txt("USTSO_ACCOUNT", 15, 40),
    txt("USTSO_COMMAND", 56, 80),
    txt("USTSO_DEST", 137, 8),
    txt("USTSO_HOLD_CLASS", 146, 1),
    txt("USTSO_JOB_CLASS", 148, 1),
    txt("USTSO_MSG_CLASS", 150, 1),
    txt("USTSO_LOGON_PROC", 152, 8),
    num("USTSO_LOGON_SIZE", 161, 7),
    num("USTSO_MAX_SIZE", 169, 7),
    txt("USTSO_SYSOUT_CLASS", 177, 1),
    txt("USTSO_UNIT", 179, 8),
    txt("USTSO_USER_DATA", 188, 4),
    txt("USTSO_SECLABEL", 193, 8),
];

const USOMVS: &[FieldDef] = &[
    txt("USOMVS_RECORD_TYPE", 1, 4),
    txt("USOMVS_NAME", 6, 8),
    num("USOMVS_UID", 15, 10),
    txt("USOMVS_HOME_PATH", 26, 255),
    txt("USOMVS_PROGRAM", 282, 255),
    num("USOMVS_CPUTIMEMAX", 538, 10),
    num("USOMVS_ASSIZEMAX", 549, 10),
    num("USOMVS_FILEPROCMAX", 560, 10),
    num("USOMVS_PROCUSERMAX", 571, 10),
    num("USOMVS_THREADSMAX", 582, 10),
    num("USOMVS_MMAPAREAMAX", 593, 10),
    txt("USOMVS_MEMLIMIT", 604, 9),
    txt("USOMVS_SHMEMMAX", 614, 9),
];

// ---------------------------------------------------------------------------
// Dataset records
// ---------------------------------------------------------------------------

const DSBD: &[FieldDef] = &[
    txt("DSBD_RECORD_TYPE", 1, 4),
    txt("DSBD_NAME", 6, 44),
    txt("DSBD_VOL", 51, 6),
    date("DSBD_CREATE_DATE", 58),
    txt("DSBD_OWNER_ID", 69, 8),
    date("DSBD_LASTREF_DATE", 78),
    date("DSBD_LASTCHG_DATE", 89),
    num("DSBD_ALTER_CNT", 100, 5),
    num("DSBD_CONTROL_CNT", 106, 5),
    num("DSBD_UPDATE_CNT", 112, 5),
    num("DSBD_READ_CNT", 118, 5),
    txt("DSBD_UACC", 124, 8),
    yes_no("DSBD_GRPDS", 133),
    txt("DSBD_AUDIT_LEVEL", 138, 8),
    num("DSBD_LEVEL", 147, 3),
    txt("DSBD_GRP_ID", 151, 8),
    txt("DSBD_DS_TYPE", 160, 8),
    yes_no("DSBD_ERASE", 169),
    num("DSBD_SECLEVEL", 174, 3),
    yes_no("DSBD_MODEL", 178),
    txt("DSBD_INSTALL_DATA", 183, 255),
    txt("DSBD_SECLABEL", 439, 8),
    txt("DSBD_NOTIFY_ID", 448, 8),
];

const DSCAT: &[FieldDef] = &[
    txt("DSCAT_RECORD_TYPE", 1, 4),
    txt("DSCAT_NAME", 6, 44),
    txt("DSCAT_VOL", 51, 6),
    num("DSCAT_CATEGORY", 58, 5),
];

const DSVOL: &[FieldDef] = &[
    txt("DSVOL_RECORD_TYPE", 1, 4),
    txt("DSVOL_NAME", 6, 44),
    txt("DSVOL_VOL", 51, 6),
    txt("DSVOL_VOL_NAME", 58, 6),
];

const DSACC: &[FieldDef] = &[
    txt("DSACC_RECORD_TYPE", 1, 4),
    txt("DSACC_NAME", 6, 44),
    txt("DSACC_VOL", 51, 6),
    txt("DSACC_AUTH_ID", 58, 8),
    txt("DSACC_ACCESS", 67, 8),
    num("DSACC_ACCESS_CNT", 76, 5),
];

const DSINSTD: &[FieldDef] = &[
    txt("DSINSTD_RECORD_TYPE", 1, 4),
    txt("DSINSTD_NAME", 6, 44),
    txt("DSINSTD_VOL", 51, 6),
    txt("DSINSTD_USR_NAME", 58, 8),
    txt("DSINSTD_USR_DATA", 67, 255),
    txt("DSINSTD_USR_FLAG", 323, 2),
];

const DSDFP: &[FieldDef] = &[
    txt("DSDFP_RECORD_TYPE", 1, 4),
    txt("DSDFP_NAME", 6, 44),
    txt("DSDFP_VOL", 51, 6),
    txt("DSDFP_RESOWNER_ID", 58, 8),
    txt("DSDFP_DATAKEY", 67, 64),
];

// ---------------------------------------------------------------------------
// General resource records
// ---------------------------------------------------------------------------

const GRBD: &[FieldDef] = &[
    txt("GRBD_RECORD_TYPE", 1, 4),
    txt("GRBD_NAME", 6, 246),
    txt("GRBD_CLASS_NAME", 253, 8),
    date("GRBD_CREATE_DATE", 262),
    txt("GRBD_OWNER_ID", 273, 8),
    date("GRBD_LASTREF_DATE", 282),
    date("GRBD_LASTCHG_DATE", 293),
    num("GRBD_ALTER_CNT", 304, 5),
    num("GRBD_CONTROL_CNT", 310, 5),
    num("GRBD_UPDATE_CNT", 316, 5),
    num("GRBD_READ_CNT", 322, 5),
    txt("GRBD_UACC", 328, 8),
    txt("GRBD_AUDIT_LEVEL", 337, 8),
    num("GRBD_LEVEL", 346, 3),
    yes_no("GRBD_SINGLEDS", 350),
    yes_no("GRBD_AUTOMATIC", 355),
    yes_no("GRBD_WARNING", 360),
    num("GRBD_SECLEVEL", 365, 3),
    txt("GRBD_NOTIFY_ID", 369, 8),
];

const GRCAT: &[FieldDef] = &[
    txt("GRCAT_RECORD_TYPE", 1, 4),
    txt("GRCAT_NAME", 6, 246),
    txt("GRCAT_CLASS_NAME", 253, 8),
    num("GRCAT_CATEGORY", 262, 5),
];

const GRMEM: &[FieldDef] = &[
    txt("GRMEM_RECORD_TYPE", 1, 4),
    txt("GRMEM_NAME", 6, 246),
    txt("GRMEM_CLASS_NAME", 253, 8),
    txt("GRMEM_MEMBER", 262, 255),
];

const GRACC: &[FieldDef] = &[
    txt("GRACC_RECORD_TYPE", 1, 4),
    txt("GRACC_NAME", 6, 246),
    txt("GRACC_CLASS_NAME", 253, 8),
    txt("GRACC_AUTH_ID", 262, 8),
    txt("GRACC_ACCESS", 271, 8),
    num("GRACC_ACCESS_CNT", 280, 5),
];

const GRCACC: &[FieldDef] = &[
    txt("GRCACC_RECORD_TYPE", 1, 4),
    txt("GRCACC_NAME", 6, 246),
    txt("GRCACC_CLASS_NAME", 253, 8),
    txt("GRCACC_AUTH_ID", 262, 8),
    txt("GRCACC_ACCESS", 271, 8),
    num("GRCACC_ACCESS_CNT", 280, 5),
    txt("GRCACC_CATYPE", 286, 8),
    txt("GRCACC_CANAME", 295, 8),
    txt("GRCACC_NET_ID", 304, 8),
    txt("GRCACC_CACRITERIA", 313, 8),
];

/// Every registered security-unload schema.
pub static SCHEMAS: &[Schema] = &[
    Schema { key: key("0100", 1), name: "GPBD", min_len: 357, fields: GPBD_V1 },
    Schema { key: key("0100", 2), name: "GPBD", min_len: 362, fields: GPBD_V2 },
    Schema { key: key("0101", 1), name: "GPSGRP", min_len: 22, fields: GPSGRP },
    Schema { key: key("0102", 1), name: "GPMEM", min_len: 31, fields: GPMEM },
    Schema { key: key("0103", 1), name: "GPINSTD", min_len: 281, fields: GPINSTD },
    Schema { key: key("0110", 1), name: "GPDFP", min_len: 49, fields: GPDFP },
    Schema { key: key("0120", 1), name: "GPOMVS", min_len: 24, fields: GPOMVS },
    Schema { key: key("0141", 1), name: "GPTME", min_len: 260, fields: GPTME },
    Schema { key: key("0151", 1), name: "GPCSD", min_len: 284, fields: GPCSD },
    Schema { key: key("0200", 1), name: "USBD", min_len: 539, fields: USBD_V1 },
    Schema { key: key("0200", 2), name: "USBD", min_len: 637, fields: USBD_V2 },
    Schema { key: key("0201", 1), name: "USCAT", min_len: 19, fields: USCAT },
    Schema { key: key("0202", 1), name: "USCLA", min_len: 22, fields: USCLA },
    Schema { key: key("0203", 1), name: "USGCON", min_len: 77, fields: USGCON },
    Schema { key: key("0204", 1), name: "USINSTD", min_len: 281, fields: USINSTD },
    Schema { key: key("0205", 1), name: "USCON", min_len: 124, fields: USCON },
    Schema { key: key("0210", 1), name: "USDFP", min_len: 49, fields: USDFP },
    Schema { key: key("0220", 1), name: "USTSO", min_len: 200, fields: USTSO },
    Schema { key: key("0270", 1), name: "USOMVS", min_len: 622, fields: USOMVS },
    Schema { key: key("0400", 1), name: "DSBD", min_len: 455, fields: DSBD },
    Schema { key: key("0401", 1), name: "DSCAT", min_len: 62, fields: DSCAT },
    Schema { key: key("0403", 1), name: "DSVOL", min_len: 63, fields: DSVOL },
    Schema { key: key("0404", 1), name: "DSACC", min_len: 80, fields: DSACC },
    Schema { key: key("0405", 1), name: "DSINSTD", min_len: 324, fields: DSINSTD },
    Schema { key: key("0410", 1), name: "DSDFP", min_len: 130, fields: DSDFP },
    Schema { key: key("0500", 1), name: "GRBD", min_len: 376, fields: GRBD },
    Schema { key: key("0502", 1), name: "GRCAT", min_len: 266, fields: GRCAT },
    Schema { key: key("0503", 1), name: "GRMEM", min_len: 516, fields: GRMEM },
    Schema { key: key("0505", 1), name: "GRACC", min_len: 284, fields: GRACC },
    Schema { key: key("0507", 1), name: "GRCACC", min_len: 320, fields: GRCACC },
];
