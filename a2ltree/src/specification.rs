use a2ltreemacros::a2l_grammar;

// Catalog of all a2l node types.
//
// block:    enclosed in /begin TAG ... /end TAG
// keyword:  TAG followed by its values on one line
// Items are positional values (`type name`, `type[dim] name`, `{type a type b}* name`)
// followed by references to child nodes (`[-> TAG]` optional, `[-> TAG]*` list, `[-> TAG]!` required).

a2l_grammar! {
    /// Root of every file. It is never written with a tag of its own
    keyword A2L_FILE {
        [-> ASAP2_VERSION]
        [-> A2ML_VERSION]
        [-> PROJECT]!
    }

    /// Addressing of table values or axis point values
    enum AddrType {
        PBYTE,
        PWORD,
        PLONG,
        PLONGLONG,
        DIRECT
    }

    enum DataTypeSize {
        BYTE,
        WORD,
        LONG
    }

    enum DataType {
        UBYTE,
        SBYTE,
        UWORD,
        SWORD,
        ULONG,
        SLONG,
        A_UINT64,
        A_INT64,
        FLOAT16_IEEE,
        FLOAT32_IEEE,
        FLOAT64_IEEE
    }

    enum IndexOrder {
        INDEX_INCR,
        INDEX_DECR
    }

    /// Type declarations in the A2ML meta-language. The text is kept verbatim
    block A2ML {
        #[A2ML]
    }

    keyword A2ML_VERSION {
        uint version_no
        uint upgrade_no
    }

    keyword ADDR_EPK {
        ulong address
    }

    keyword ALIGNMENT_BYTE {
        uint alignment_border
    }

    keyword ALIGNMENT_FLOAT32_IEEE {
        uint alignment_border
    }

    keyword ALIGNMENT_FLOAT64_IEEE {
        uint alignment_border
    }

    keyword ALIGNMENT_INT64 {
        uint alignment_border
    }

    keyword ALIGNMENT_LONG {
        uint alignment_border
    }

    keyword ALIGNMENT_WORD {
        uint alignment_border
    }

    /// Free-form description attached to an object
    block ANNOTATION {
        [-> ANNOTATION_LABEL]
        [-> ANNOTATION_ORIGIN]
        [-> ANNOTATION_TEXT]
    }

    keyword ANNOTATION_LABEL {
        string label
    }

    keyword ANNOTATION_ORIGIN {
        string origin
    }

    block ANNOTATION_TEXT {
        {string annotation_text}* text
    }

    keyword ARRAY_SIZE {
        uint number
    }

    keyword ASAP2_VERSION {
        uint version_no
        uint upgrade_no
    }

    enum AxisDescrAttribute {
        CURVE_AXIS,
        COM_AXIS,
        FIX_AXIS,
        RES_AXIS,
        STD_AXIS
    }

    /// Axis description within an adjustable object
    block AXIS_DESCR {
        AxisDescrAttribute attribute
        ident input_quantity
        ident conversion
        uint max_axis_points
        float lower_limit
        float upper_limit
        [-> ANNOTATION]*
        [-> AXIS_PTS_REF]
        [-> BYTE_ORDER]
        [-> CURVE_AXIS_REF]
        [-> DEPOSIT]
        [-> EXTENDED_LIMITS]
        [-> FIX_AXIS_PAR]
        [-> FIX_AXIS_PAR_DIST]
        [-> FIX_AXIS_PAR_LIST]
        [-> FORMAT]
        [-> MAX_GRAD]
        [-> MONOTONY]
        [-> PHYS_UNIT]
        [-> READ_ONLY]
        [-> STEP_SIZE]
    }

    block AXIS_PTS {
        ident name
        string long_identifier
        ulong address
        ident input_quantity
        ident deposit_record
        float max_diff
        ident conversion
        uint max_axis_points
        float lower_limit
        float upper_limit
        [-> ANNOTATION]*
        [-> BYTE_ORDER]
        [-> CALIBRATION_ACCESS]
        [-> DEPOSIT]
        [-> DISPLAY_IDENTIFIER]
        [-> ECU_ADDRESS_EXTENSION]
        [-> EXTENDED_LIMITS]
        [-> FORMAT]
        [-> FUNCTION_LIST]
        [-> GUARD_RAILS]
        [-> IF_DATA]*
        [-> MONOTONY]
        [-> PHYS_UNIT]
        [-> READ_ONLY]
        [-> REF_MEMORY_SEGMENT]
        [-> STEP_SIZE]
        [-> SYMBOL_LINK]
    }

    keyword AXIS_PTS_REF {
        ident axis_points
    }

    keyword AXIS_PTS_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
        IndexOrder index_incr
        AddrType addressing
    }

    keyword AXIS_RESCALE_X /_Y /_Z / _4 / _5 {
        uint position
        DataType data_type
        uint max_number_of_rescale_pairs
        IndexOrder index_incr
        AddrType addressing
    }

    keyword BIT_MASK {
        ulong mask
    }

    block BIT_OPERATION {
        [-> LEFT_SHIFT]
        [-> RIGHT_SHIFT]
        [-> SIGN_EXTEND]
    }

    enum ByteOrderEnum {
        LITTLE_ENDIAN,
        BIG_ENDIAN,
        MSB_LAST,
        MSB_FIRST,
        MSB_FIRST_MSW_LAST,
        MSB_LAST_MSW_FIRST
    }

    keyword BYTE_ORDER {
        ByteOrderEnum byte_order
    }

    enum CalibrationAccessEnum {
        CALIBRATION,
        NO_CALIBRATION,
        NOT_IN_MCD_SYSTEM,
        OFFLINE_CALIBRATION
    }

    keyword CALIBRATION_ACCESS {
        CalibrationAccessEnum calibration_access
    }

    block CALIBRATION_HANDLE {
        {long handle}* handle
        [-> CALIBRATION_HANDLE_TEXT]
    }

    keyword CALIBRATION_HANDLE_TEXT {
        string text
    }

    block CALIBRATION_METHOD {
        string method
        ulong version
        [-> CALIBRATION_HANDLE]
    }

    enum CharacteristicType {
        ASCII,
        CURVE,
        MAP,
        CUBOID,
        CUBE_4,
        CUBE_5,
        VAL_BLK,
        VALUE
    }

    /// An adjustable object
    block CHARACTERISTIC {
        ident name
        string long_identifier
        CharacteristicType type
        ulong address
        ident deposit
        float max_diff
        ident conversion
        float lower_limit
        float upper_limit
        [-> ANNOTATION]*
        [-> AXIS_DESCR]*
        [-> BIT_MASK]
        [-> BYTE_ORDER]
        [-> CALIBRATION_ACCESS]
        [-> COMPARISON_QUANTITY]
        [-> DEPENDENT_CHARACTERISTIC]
        [-> DISCRETE]
        [-> DISPLAY_IDENTIFIER]
        [-> ECU_ADDRESS_EXTENSION]
        [-> ENCODING]
        [-> EXTENDED_LIMITS]
        [-> FORMAT]
        [-> FUNCTION_LIST]
        [-> GUARD_RAILS]
        [-> IF_DATA]*
        [-> MAP_LIST]
        [-> MATRIX_DIM]
        [-> MAX_REFRESH]
        [-> MODEL_LINK]
        [-> NUMBER]
        [-> PHYS_UNIT]
        [-> READ_ONLY]
        [-> REF_MEMORY_SEGMENT]
        [-> STEP_SIZE]
        [-> SYMBOL_LINK]
        [-> VIRTUAL_CHARACTERISTIC]
    }

    keyword COEFFS {
        float a
        float b
        float c
        float d
        float e
        float f
    }

    keyword COEFFS_LINEAR {
        float a
        float b
    }

    keyword COMPARISON_QUANTITY {
        ident name
    }

    enum ConversionType {
        IDENTICAL,
        FORM,
        LINEAR,
        RAT_FUNC,
        TAB_INTP,
        TAB_NOINTP,
        TAB_VERB
    }

    /// Conversion from internal values to physical values
    block COMPU_METHOD {
        ident name
        string long_identifier
        ConversionType conversion_type
        string format
        string unit
        [-> COEFFS]
        [-> COEFFS_LINEAR]
        [-> COMPU_TAB_REF]
        [-> FORMULA]
        [-> REF_UNIT]
        [-> STATUS_STRING_REF]
    }

    /// Conversion table for conversions that cannot be expressed as a formula
    block COMPU_TAB {
        ident name
        string long_identifier
        ConversionType conversion_type
        uint number_value_pair
        {
            float in_val
            float out_val
        }* in_val_out_val
        [-> DEFAULT_VALUE]
        [-> DEFAULT_VALUE_NUMERIC]
    }

    keyword COMPU_TAB_REF {
        ident conversion_table
    }

    block COMPU_VTAB {
        ident name
        string long_identifier
        ConversionType conversion_type
        uint number_value_pair
        {
            float in_val
            string out_val
        }* in_val_out_val
        [-> DEFAULT_VALUE]
    }

    block COMPU_VTAB_RANGE {
        ident name
        string long_identifier
        uint number_value_triple
        {
            float in_val_min
            float in_val_max
            string out_val
        }* in_val_out_val
        [-> DEFAULT_VALUE]
    }

    keyword CPU_TYPE {
        string cpu
    }

    keyword CURVE_AXIS_REF {
        ident curve_axis
    }

    keyword CUSTOMER {
        string customer
    }

    keyword CUSTOMER_NO {
        string number
    }

    keyword DATA_SIZE {
        uint size
    }

    block DEF_CHARACTERISTIC {
        {ident identifier}* identifier
    }

    keyword DEFAULT_VALUE {
        string display_string
    }

    keyword DEFAULT_VALUE_NUMERIC {
        float display_value
    }

    block DEPENDENT_CHARACTERISTIC {
        string formula
        {ident characteristic}* characteristic
    }

    enum DepositMode {
        ABSOLUTE,
        DIFFERENCE
    }

    keyword DEPOSIT {
        DepositMode mode
    }

    keyword DISCRETE {}

    keyword DISPLAY_IDENTIFIER {
        ident display_name
    }

    keyword DIST_OP_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword ECU {
        string control_unit
    }

    keyword ECU_ADDRESS {
        ulong address
    }

    keyword ECU_ADDRESS_EXTENSION {
        int extension
    }

    keyword ECU_CALIBRATION_OFFSET {
        long offset
    }

    keyword EPK {
        string identifier
    }

    keyword ERROR_MASK {
        ulong mask
    }

    keyword EXTENDED_LIMITS {
        float lower_limit
        float upper_limit
    }

    keyword FIX_AXIS_PAR {
        int offset
        int shift
        uint numberapo
    }

    keyword FIX_AXIS_PAR_DIST {
        int offset
        int distance
        uint numberapo
    }

    block FIX_AXIS_PAR_LIST {
        {float axis_pts_value}* axis_pts_value
    }

    keyword FIX_NO_AXIS_PTS_X / _Y / _Z / _4 / _5 {
        uint number_of_axis_points
    }

    enum IndexMode {
        ALTERNATE_CURVES,
        ALTERNATE_WITH_X,
        ALTERNATE_WITH_Y,
        COLUMN_DIR,
        ROW_DIR
    }

    keyword FNC_VALUES {
        uint position
        DataType data_type
        IndexMode index_mode
        AddrType addr_type
    }

    keyword FORMAT {
        string format_string
    }

    block FORMULA {
        string f
        [-> FORMULA_INV]
    }

    keyword FORMULA_INV {
        string gx
    }

    block FRAME {
        ident name
        string long_identifier
        uint scaling_unit
        ulong rate
        [-> FRAME_MEASUREMENT]
        [-> IF_DATA]*
    }

    keyword FRAME_MEASUREMENT {
        {ident identifier}* identifier
    }

    block FUNCTION {
        ident name
        string long_identifier
        [-> ANNOTATION]*
        [-> AR_COMPONENT]
        [-> DEF_CHARACTERISTIC]
        [-> FUNCTION_VERSION]
        [-> IF_DATA]*
        [-> IN_MEASUREMENT]
        [-> LOC_MEASUREMENT]
        [-> OUT_MEASUREMENT]
        [-> REF_CHARACTERISTIC]
        [-> SUB_FUNCTION]
    }

    block FUNCTION_LIST {
        {ident name}* name
    }

    keyword FUNCTION_VERSION {
        string version_identifier
    }

    block GROUP {
        ident group_name
        string group_long_identifier
        [-> ANNOTATION]*
        [-> FUNCTION_LIST]
        [-> IF_DATA]*
        [-> REF_CHARACTERISTIC]
        [-> REF_MEASUREMENT]
        [-> ROOT]
        [-> SUB_GROUP]
    }

    keyword GUARD_RAILS {}

    block HEADER {
        string comment
        [-> PROJECT_NO]
        [-> VERSION]
    }

    keyword IDENTIFICATION {
        uint position
        DataType data_type
    }

    /// Interface specific data; the content is described by the A2ML declarations
    block IF_DATA {
        #[IF_DATA]
    }

    block IN_MEASUREMENT {
        {ident identifier}* identifier
    }

    keyword LAYOUT {
        IndexMode index_mode
    }

    keyword LEFT_SHIFT {
        ulong bitcount
    }

    block LOC_MEASUREMENT {
        {ident identifier}* identifier
    }

    block MAP_LIST {
        {ident name}* name
    }

    /// One value per dimension
    keyword MATRIX_DIM {
        {uint dim}* dim
    }

    keyword MAX_GRAD {
        float max_gradient
    }

    keyword MAX_REFRESH {
        uint scaling_unit
        ulong rate
    }

    /// A measurable object
    block MEASUREMENT {
        ident name
        string long_identifier
        DataType data_type
        ident conversion
        uint resolution
        float accuracy
        float lower_limit
        float upper_limit
        [-> ANNOTATION]*
        [-> ARRAY_SIZE]
        [-> BIT_MASK]
        [-> BIT_OPERATION]
        [-> BYTE_ORDER]
        [-> DISCRETE]
        [-> DISPLAY_IDENTIFIER]
        [-> ECU_ADDRESS]
        [-> ECU_ADDRESS_EXTENSION]
        [-> ERROR_MASK]
        [-> FORMAT]
        [-> FUNCTION_LIST]
        [-> IF_DATA]*
        [-> LAYOUT]
        [-> MATRIX_DIM]
        [-> MAX_REFRESH]
        [-> PHYS_UNIT]
        [-> READ_WRITE]
        [-> REF_MEMORY_SEGMENT]
        [-> SYMBOL_LINK]
        [-> VIRTUAL]
    }

    enum ProgType {
        PRG_CODE,
        PRG_DATA,
        PRG_RESERVED
    }

    block MEMORY_LAYOUT {
        ProgType prg_type
        ulong address
        ulong size
        long[5] offset
        [-> IF_DATA]*
    }

    enum PrgType {
        CALIBRATION_VARIABLES,
        CODE,
        DATA,
        EXCLUDE_FROM_FLASH,
        OFFLINE_DATA,
        RESERVED,
        SERAM,
        VARIABLES
    }

    enum MemoryType {
        EEPROM,
        EPROM,
        FLASH,
        RAM,
        ROM,
        REGISTER,
        NOT_IN_ECU
    }

    enum MemoryAttribute {
        INTERN,
        EXTERN
    }

    block MEMORY_SEGMENT {
        ident name
        string long_identifier
        PrgType prg_type
        MemoryType memory_type
        MemoryAttribute attribute
        ulong address
        ulong size
        long[5] offset
        [-> IF_DATA]*
    }

    block MOD_COMMON {
        string comment
        [-> ALIGNMENT_BYTE]
        [-> ALIGNMENT_FLOAT16_IEEE]
        [-> ALIGNMENT_FLOAT32_IEEE]
        [-> ALIGNMENT_FLOAT64_IEEE]
        [-> ALIGNMENT_INT64]
        [-> ALIGNMENT_LONG]
        [-> ALIGNMENT_WORD]
        [-> BYTE_ORDER]
        [-> DATA_SIZE]
        [-> DEPOSIT]
        [-> S_REC_LAYOUT]
    }

    block MOD_PAR {
        string comment
        [-> ADDR_EPK]*
        [-> CALIBRATION_METHOD]*
        [-> CPU_TYPE]
        [-> CUSTOMER]
        [-> CUSTOMER_NO]
        [-> ECU]
        [-> ECU_CALIBRATION_OFFSET]
        [-> EPK]
        [-> MEMORY_LAYOUT]*
        [-> MEMORY_SEGMENT]*
        [-> NO_OF_INTERFACES]
        [-> PHONE_NO]
        [-> SUPPLIER]
        [-> SYSTEM_CONSTANT]*
        [-> USER]
        [-> VERSION]
    }

    /// Description of one ECU
    block MODULE {
        ident name
        string long_identifier
        [-> A2ML]
        [-> AXIS_PTS]*
        [-> BLOB]*
        [-> CHARACTERISTIC]*
        [-> COMPU_METHOD]*
        [-> COMPU_TAB]*
        [-> COMPU_VTAB]*
        [-> COMPU_VTAB_RANGE]*
        [-> FRAME]
        [-> FUNCTION]*
        [-> GROUP]*
        [-> IF_DATA]*
        [-> INSTANCE]*
        [-> MEASUREMENT]*
        [-> MOD_COMMON]
        [-> MOD_PAR]
        [-> RECORD_LAYOUT]*
        [-> TRANSFORMER]*
        [-> TYPEDEF_BLOB]*
        [-> TYPEDEF_AXIS]*
        [-> TYPEDEF_CHARACTERISTIC]*
        [-> TYPEDEF_MEASUREMENT]*
        [-> TYPEDEF_STRUCTURE]*
        [-> UNIT]*
        [-> USER_RIGHTS]*
        [-> VARIANT_CODING]
    }

    enum MonotonyType {
        MON_DECREASE,
        MON_INCREASE,
        STRICT_DECREASE,
        STRICT_INCREASE,
        MONOTONOUS,
        STRICT_MON,
        NOT_MON
    }

    keyword MONOTONY {
        MonotonyType monotony
    }

    keyword NO_AXIS_PTS_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword NO_OF_INTERFACES {
        uint num
    }

    keyword NO_RESCALE_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword NUMBER {
        uint number
    }

    keyword OFFSET_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    block OUT_MEASUREMENT {
        {ident identifier}* identifier
    }

    keyword PHONE_NO {
        string telnum
    }

    keyword PHYS_UNIT {
        string unit
    }

    /// Top level container of the modules
    block PROJECT {
        ident name
        string long_identifier
        [-> HEADER]
        [-> MODULE]*
    }

    keyword PROJECT_NO {
        ident project_number
    }

    keyword READ_ONLY {}

    keyword READ_WRITE {}

    /// Memory layout of an adjustable object
    block RECORD_LAYOUT {
        ident name
        [-> ALIGNMENT_BYTE]
        [-> ALIGNMENT_FLOAT16_IEEE]
        [-> ALIGNMENT_FLOAT32_IEEE]
        [-> ALIGNMENT_FLOAT64_IEEE]
        [-> ALIGNMENT_INT64]
        [-> ALIGNMENT_LONG]
        [-> ALIGNMENT_WORD]
        [-> AXIS_PTS_X/_Y/_Z/_4/_5]
        [-> AXIS_RESCALE_X/_Y/_Z/_4/_5]
        [-> DIST_OP_X/_Y/_Z/_4/_5]
        [-> FIX_NO_AXIS_PTS_X/_Y/_Z/_4/_5]
        [-> FNC_VALUES]
        [-> IDENTIFICATION]
        [-> NO_AXIS_PTS_X/_Y/_Z/_4/_5]
        [-> NO_RESCALE_X/_Y/_Z/_4/_5]
        [-> OFFSET_X/_Y/_Z/_4/_5]
        [-> RESERVED]*
        [-> RIP_ADDR_W/_X/_Y/_Z/_4/_5]
        [-> SRC_ADDR_X/_Y/_Z/_4/_5]
        [-> SHIFT_OP_X/_Y/_Z/_4/_5]
        [-> STATIC_RECORD_LAYOUT]
        [-> STATIC_ADDRESS_OFFSETS]
    }

    block REF_CHARACTERISTIC {
        {ident identifier}* identifier
    }

    block REF_GROUP {
        {ident identifier}* identifier
    }

    block REF_MEASUREMENT {
        {ident identifier}* identifier
    }

    keyword REF_MEMORY_SEGMENT {
        ident name
    }

    keyword REF_UNIT {
        ident unit
    }

    keyword RESERVED {
        uint position
        DataTypeSize data_size
    }

    keyword RIGHT_SHIFT {
        ulong bitcount
    }

    keyword RIP_ADDR_W / _X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword ROOT {}

    keyword SHIFT_OP_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword SIGN_EXTEND {}

    keyword SI_EXPONENTS {
        int length
        int mass
        int time
        int electric_current
        int temperature
        int amount_of_substance
        int luminous_intensity
    }

    keyword SRC_ADDR_X / _Y / _Z / _4 / _5 {
        uint position
        DataType data_type
    }

    keyword STATIC_RECORD_LAYOUT {}

    keyword STATUS_STRING_REF {
        ident conversion_table
    }

    keyword STEP_SIZE {
        float step_size
    }

    block SUB_FUNCTION {
        {ident identifier}* identifier
    }

    block SUB_GROUP {
        {ident identifier}* identifier
    }

    keyword SUPPLIER {
        string manufacturer
    }

    keyword SYMBOL_LINK {
        string symbol_name
        long offset
    }

    keyword SYSTEM_CONSTANT {
        string name
        string value
    }

    keyword S_REC_LAYOUT {
        ident name
    }

    enum UnitType {
        DERIVED,
        EXTENDED_SI
    }

    block UNIT {
        ident name
        string long_identifier
        string display
        UnitType type
        [-> REF_UNIT]
        [-> SI_EXPONENTS]
        [-> UNIT_CONVERSION]
    }

    keyword UNIT_CONVERSION {
        float gradient
        float offset
    }

    keyword USER {
        string user_name
    }

    block USER_RIGHTS {
        ident user_level_id
        [-> READ_ONLY]
        [-> REF_GROUP]*
    }

    block VAR_ADDRESS {
        {ulong address}* address
    }

    block VAR_CHARACTERISTIC {
        ident name
        {ident criterion_name}* criterion_name
        [-> VAR_ADDRESS]
    }

    block VAR_CRITERION {
        ident name
        string long_identifier
        {ident value}* value
        [-> VAR_MEASUREMENT]
        [-> VAR_SELECTION_CHARACTERISTIC]
    }

    block VAR_FORBIDDEN_COMB {
        {
            ident criterion_name
            ident criterion_value
        }* criterion
    }

    keyword VAR_MEASUREMENT {
        ident name
    }

    enum VarNamingTag {
        NUMERIC
    }

    keyword VAR_NAMING {
        VarNamingTag tag
    }

    keyword VAR_SELECTION_CHARACTERISTIC {
        ident name
    }

    keyword VAR_SEPARATOR {
        string separator
    }

    block VARIANT_CODING {
        [-> VAR_CHARACTERISTIC]*
        [-> VAR_CRITERION]*
        [-> VAR_FORBIDDEN_COMB]*
        [-> VAR_NAMING]
        [-> VAR_SEPARATOR]
    }

    keyword VERSION {
        string version_identifier
    }

    block VIRTUAL {
        {ident measuring_channel}* measuring_channel
    }

    block VIRTUAL_CHARACTERISTIC {
        string formula
        {ident characteristic}* characteristic
    }

    // elements that were added in version 1.70 and later
    enum CharacterEncoding {
        UTF8,
        UTF16,
        UTF32
    }

    keyword ADDRESS_TYPE {
        AddrType address_type
    }

    keyword ALIGNMENT_FLOAT16_IEEE {
        uint alignment_border
    }

    keyword AR_COMPONENT {
        string component_type
    }

    block BLOB {
        ident name
        string long_identifier
        ulong start_address
        ulong size
        [-> ADDRESS_TYPE]
        [-> ANNOTATION]*
        [-> CALIBRATION_ACCESS]
        [-> DISPLAY_IDENTIFIER]
        [-> ECU_ADDRESS_EXTENSION]
        [-> IF_DATA]*
        [-> MAX_REFRESH]
        [-> MODEL_LINK]
        [-> SYMBOL_LINK]
    }

    keyword CONSISTENT_EXCHANGE {}

    keyword ENCODING {
        CharacterEncoding encoding
    }

    block INSTANCE {
        ident name
        string long_identifier
        ident type_ref
        ulong start_address
        [-> ADDRESS_TYPE]
        [-> ANNOTATION]*
        [-> CALIBRATION_ACCESS]
        [-> DISPLAY_IDENTIFIER]
        [-> ECU_ADDRESS_EXTENSION]
        [-> IF_DATA]*
        [-> MATRIX_DIM]
        [-> MAX_REFRESH]
        [-> MODEL_LINK]
        [-> OVERWRITE]
        [-> READ_ONLY]
        [-> SYMBOL_LINK]
    }

    keyword MODEL_LINK {
        string model_link
    }

    keyword OVERWRITE {}

    keyword STATIC_ADDRESS_OFFSETS {}

    block STRUCTURE_COMPONENT {
        ident component_name
        ident component_type
        ulong size
        [-> ADDRESS_TYPE]
        [-> LAYOUT]
        [-> MATRIX_DIM]
        [-> SYMBOL_TYPE_LINK]
    }

    keyword SYMBOL_TYPE_LINK {
        string symbol_type
    }

    enum TransformerTrigger {
        ON_USER_REQUEST,
        ON_CHANGE
    }

    block TRANSFORMER {
        ident transformer_name
        string version
        string dllname_32bit
        string dllname_64bit
        uint timeout
        TransformerTrigger trigger
        ident inverse_transformer
        [-> TRANSFORMER_IN_OBJECTS]
        [-> TRANSFORMER_OUT_OBJECTS]
    }

    block TRANSFORMER_IN_OBJECTS {
        {ident identifier}* identifier
    }

    block TRANSFORMER_OUT_OBJECTS {
        {ident identifier}* identifier
    }

    block TYPEDEF_AXIS {
        ident name
        string long_identifier
        ident input_quantity
        ident record_layout
        float max_diff
        ident conversion
        uint max_axis_points
        float lower_limit
        float upper_limit
        [-> BYTE_ORDER]
        [-> DEPOSIT]
        [-> EXTENDED_LIMITS]
        [-> FORMAT]
        [-> MONOTONY]
        [-> PHYS_UNIT]
        [-> STEP_SIZE]
    }

    block TYPEDEF_BLOB {
        ident name
        string long_identifier
        ulong size
        [-> ADDRESS_TYPE]
    }

    block TYPEDEF_CHARACTERISTIC {
        ident name
        string long_identifier
        CharacteristicType type
        ident record_layout
        float max_diff
        ident conversion
        float lower_limit
        float upper_limit
        [-> AXIS_DESCR]*
        [-> BIT_MASK]
        [-> BYTE_ORDER]
        [-> DISCRETE]
        [-> ENCODING]
        [-> EXTENDED_LIMITS]
        [-> FORMAT]
        [-> MATRIX_DIM]
        [-> NUMBER]
        [-> PHYS_UNIT]
        [-> STEP_SIZE]
    }

    block TYPEDEF_MEASUREMENT {
        ident name
        string long_identifier
        DataType data_type
        ident conversion
        uint resolution
        float accuracy
        float lower_limit
        float upper_limit
        [-> BIT_MASK]
        [-> BIT_OPERATION]
        [-> BYTE_ORDER]
        [-> ERROR_MASK]
        [-> DISCRETE]
        [-> FORMAT]
        [-> LAYOUT]
        [-> MATRIX_DIM]
        [-> PHYS_UNIT]
    }

    block TYPEDEF_STRUCTURE {
        ident name
        string long_identifier
        ulong total_size
        [-> ADDRESS_TYPE]
        [-> CONSISTENT_EXCHANGE]
        [-> STRUCTURE_COMPONENT]*
        [-> SYMBOL_TYPE_LINK]
    }
}
