// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

// Only the audit table is accessed through the DSL. Entity tables go
// through the dynamic query gateway.

diesel::table! {
    edit_log (edit_id) {
        edit_id -> BigInt,
        table_name -> Text,
        item_id -> Nullable<BigInt>,
        column_name -> Text,
        time_stamp -> Text,
        old_value -> Text,
        new_value -> Text,
        user_name -> Text,
    }
}
