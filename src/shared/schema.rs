diesel::table! {
    gap_assessments (id) {
        id -> Int4,
        category -> Varchar,
        section -> Varchar,
        standard_ref -> Varchar,
        assessment_question -> Text,
        compliance -> Varchar,
        notes -> Nullable<Text>,
        target_date -> Nullable<Date>,
        action_item_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    maturity_assessments (id) {
        id -> Int4,
        category -> Varchar,
        section -> Varchar,
        standard_ref -> Varchar,
        assessment_question -> Text,
        current_maturity_level -> Nullable<Varchar>,
        current_maturity_score -> Nullable<Int4>,
        current_maturity_comments -> Nullable<Text>,
        target_maturity_level -> Nullable<Varchar>,
        target_maturity_score -> Nullable<Int4>,
        target_maturity_comments -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    action_items (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        status -> Varchar,
        priority -> Varchar,
        assigned_to -> Nullable<Varchar>,
        due_date -> Nullable<Date>,
        completed_date -> Nullable<Date>,
        gap_assessment_id -> Nullable<Int4>,
        maturity_assessment_id -> Nullable<Int4>,
        category -> Nullable<Varchar>,
        file_name -> Nullable<Varchar>,
        file_path -> Nullable<Text>,
        file_size -> Nullable<Int4>,
        file_type -> Nullable<Varchar>,
        clause_reference -> Nullable<Varchar>,
        annex_reference -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    evidence (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        file_name -> Varchar,
        file_path -> Text,
        file_size -> Nullable<Int4>,
        file_type -> Varchar,
        gap_assessment_id -> Nullable<Int4>,
        maturity_assessment_id -> Nullable<Int4>,
        clause_reference -> Nullable<Varchar>,
        annex_reference -> Nullable<Varchar>,
        uploaded_by -> Varchar,
        uploaded_at -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    risk_register (id) {
        id -> Int4,
        risk_id -> Varchar,
        title -> Varchar,
        description -> Nullable<Text>,
        category -> Varchar,
        likelihood -> Varchar,
        impact -> Varchar,
        risk_level -> Varchar,
        current_controls -> Nullable<Text>,
        treatment_plan -> Nullable<Text>,
        treatment_status -> Varchar,
        owner -> Varchar,
        target_date -> Nullable<Date>,
        gap_assessment_id -> Nullable<Int4>,
        annex_a_controls -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}


diesel::allow_tables_to_appear_in_same_query!(
    gap_assessments,
    maturity_assessments,
    action_items,
    evidence,
    risk_register,
);
